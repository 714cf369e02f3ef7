//! # marsh-common
//!
//! Common data model shared by the X-Marsh crates.
//!
//! This crate holds the tabular inputs consumed by the accretion engine:
//!
//! - [`TideDataset`] - tidal flooding events grouped per year and [`Season`]
//! - [`SlrTable`] - regional sea-level-rise projections with min/mean/max variants
//! - [`SlrScenario`] - one variant of the SLR table, selected by [`SlrVariant`]
//!
//! Values are validated on construction so that downstream code can rely on
//! the invariants (contiguous years, paired event sequences of equal length).

mod error;
mod slr;
mod tide;

pub use error::DataError;
pub use slr::{SlrScenario, SlrScenarioRecord, SlrTable, SlrTableRow, SlrVariant};
pub use tide::{Season, TideDataset, TideRecord};

/// Result type for data model operations.
pub type Result<T> = std::result::Result<T, DataError>;
