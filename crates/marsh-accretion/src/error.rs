//! Error types for the accretion engine.

use marsh_common::DataError;
use thiserror::Error;

/// Errors from the least-squares trend estimator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    /// `x` and `y` have different lengths.
    #[error("Input length mismatch: {x} x values, {y} y values")]
    InputLengthMismatch {
        /// Number of x samples.
        x: usize,
        /// Number of y samples.
        y: usize,
    },

    /// No samples were provided.
    #[error("No samples provided")]
    Empty,

    /// All x values are equal, so the slope is undefined.
    #[error("Degenerate input: x has zero variance over {0} samples")]
    DegenerateInput(usize),
}

/// Errors that can occur while simulating or evaluating a scenario.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccretionError {
    /// Invalid or inconsistent input data.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Trend fitting failed.
    #[error("Trend estimation failed: {0}")]
    Trend(#[from] TrendError),

    /// A model parameter is out of range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The elevation trajectory is empty.
    #[error("Scenario has no simulated years")]
    EmptyScenarioData,

    /// Elevation equals mean sea level in the first year, so `norm_diff` is undefined.
    #[error("Cannot normalize: elevation equals mean sea level in {year}")]
    DegenerateNormalization {
        /// The first simulated year.
        year: i32,
    },

    /// The fitted trend is exactly flat, so time to submergence is undefined.
    #[error("Trend slope is zero at window ending {year}")]
    ZeroSlope {
        /// Last year of the fitting window.
        year: i32,
    },
}

impl AccretionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AccretionError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
