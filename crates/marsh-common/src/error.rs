//! Error types for the data model.

use crate::Season;
use thiserror::Error;

/// Errors raised while building or querying the tide and SLR datasets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Paired sequences (high water heights and event counts) differ in length.
    #[error("Input length mismatch: {left} values paired with {right} values")]
    InputLengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// A simulated year has no record for one of the four seasons.
    #[error("Year {year} has no {season} tide data")]
    MissingSeasonData {
        /// Year lacking the season.
        year: i32,
        /// The missing season.
        season: Season,
    },

    /// The set of years contains a gap.
    #[error("Years are not contiguous: expected {expected}, found {found}")]
    NonContiguousYears {
        /// The year that should have followed.
        expected: i32,
        /// The year actually found.
        found: i32,
    },

    /// Two tide records were supplied for the same year and season.
    #[error("Duplicate tide record for {season} {year}")]
    DuplicateTideRecord {
        /// Year of the duplicate.
        year: i32,
        /// Season of the duplicate.
        season: Season,
    },

    /// Two SLR rows were supplied for the same year.
    #[error("Duplicate SLR projection for year {0}")]
    DuplicateSlrYear(i32),

    /// A tide year has no matching SLR projection.
    #[error("No SLR projection for year {0}")]
    MissingSlrYear(i32),

    /// A dataset contained no rows.
    #[error("Empty dataset: {0}")]
    EmptyDataset(&'static str),

    /// Scenario selector outside {1, 2, 3}.
    #[error("Invalid SLR selector {0} (must be 1 = min, 2 = mean or 3 = max)")]
    InvalidSlrSelect(i64),

    /// Unrecognized season or SLR variant name.
    #[error("Unknown {kind} '{value}'")]
    UnknownName {
        /// What was being parsed ("season", "SLR variant").
        kind: &'static str,
        /// The offending text.
        value: String,
    },
}
