//! # marsh-data
//!
//! Loader for the flat-file inputs of the X-Marsh simulator.
//!
//! Two tables are read per scenario:
//! - tidal projections per RCP and site (tab-separated, one row per event group)
//! - regional SLR projections per RCP (comma-separated, one row per year,
//!   min/mean/max variants)
//!
//! ## Example
//!
//! ```no_run
//! use marsh_data::{DataLoader, Rcp};
//!
//! let loader = DataLoader::new("model_input");
//! let inputs = loader.load(Rcp::Rcp45, "S15")?;
//! println!("{} years of tides", inputs.tides.num_years());
//! # Ok::<(), marsh_data::LoadError>(())
//! ```

mod error;
mod loader;
mod rcp;
mod table;

pub use error::LoadError;
pub use loader::{parse_slr, parse_tides, DataLoader, ScenarioInputs, SLR_DIR, TIDES_DIR};
pub use rcp::Rcp;

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
