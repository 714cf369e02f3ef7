//! # marsh-accretion
//!
//! Tidal marsh accretion simulation and critical state estimation.
//!
//! This crate turns tide projections and a sea-level-rise scenario into an
//! elevation trajectory and the scenario's headline metrics. It performs no
//! I/O; inputs come from `marsh-data` or are built in memory.
//!
//! ## Features
//!
//! - **Trend Estimation**: Least-squares slope of a series against time
//! - **Seasonal Physics**: Flooding-driven deposition minus subsidence and SLR loss
//! - **Annual Simulation**: Year-by-year elevation with periodic sediment nourishment
//! - **Critical State Estimation**: First year at or below mean sea level and
//!   extrapolated time to chronic submergence
//! - **Property-Based Configuration**: Parameters and coefficients from `marsh-model`
//!
//! ## Example
//!
//! ```
//! use marsh_accretion::{run_scenario, ScenarioConfig};
//! use marsh_common::{Season, SlrTable, SlrTableRow, TideDataset, TideRecord};
//!
//! let records = (2020..=2040).flat_map(|year| {
//!     Season::ALL.map(|season| TideRecord::new(year, season, vec![1.4], vec![40]).unwrap())
//! });
//! let tides = TideDataset::new(records).unwrap();
//! let slr = SlrTable::new((2020..=2040).map(|year| SlrTableRow {
//!     year,
//!     delta_min_slr: 0.002,
//!     min_slr: 0.002 * f64::from(year - 2020),
//!     delta_mean_slr: 0.004,
//!     mean_slr: 0.004 * f64::from(year - 2020),
//!     delta_max_slr: 0.01,
//!     max_slr: 0.01 * f64::from(year - 2020),
//! }))
//! .unwrap();
//!
//! let outcome = run_scenario(&tides, &slr, &ScenarioConfig::default()).unwrap();
//! assert_eq!(outcome.trajectory.len(), 21);
//! ```

mod assemble;
mod error;
mod estimate;
mod params;
mod physics;
mod scenario;
mod simulate;
mod trend;

pub use assemble::{assemble, ForcedTideDataset};
pub use error::{AccretionError, TrendError};
pub use estimate::{
    AccretionScenarioResult, AccretionScenarioRow, CriticalStateEstimator, EstimateOutcome,
    ScenarioMetrics,
};
pub use params::{
    AccretionParams, EstimatorConstants, ScenarioConfig, SeasonalCoefficients, SlrVariantSelect,
};
pub use physics::SeasonalForcing;
pub use scenario::{run_forced, run_scenario, ScenarioOutcome};
pub use simulate::{
    AnnualSimulationDriver, ElevationTrajectory, ElevationTrajectoryPoint, NourishmentSchedule,
};
pub use trend::{linear_slope, yearly_slope};

/// Result type for accretion operations.
pub type Result<T> = std::result::Result<T, AccretionError>;
