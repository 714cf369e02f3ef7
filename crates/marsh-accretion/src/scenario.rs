//! The end-to-end scenario pipeline.

use crate::assemble::{assemble, ForcedTideDataset};
use crate::estimate::{AccretionScenarioResult, CriticalStateEstimator, ScenarioMetrics};
use crate::params::ScenarioConfig;
use crate::simulate::{AnnualSimulationDriver, ElevationTrajectory};
use crate::AccretionError;
use marsh_common::{SlrTable, TideDataset};

/// Everything a scenario run produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioOutcome {
    pub trajectory: ElevationTrajectory,
    pub table: AccretionScenarioResult,
    pub metrics: ScenarioMetrics,
}

/// Select the configured SLR variant, simulate and estimate.
pub fn run_scenario(
    tides: &TideDataset,
    slr: &SlrTable,
    config: &ScenarioConfig,
) -> Result<ScenarioOutcome, AccretionError> {
    let forced = assemble(tides, slr, config.variant())?;
    run_forced(&forced, config)
}

/// Simulate and estimate an already forced dataset.
///
/// The SLR variant of `config` is ignored; the forcing series of `forced` is
/// used both for the simulation and for the mean sea level.
pub fn run_forced(
    forced: &ForcedTideDataset,
    config: &ScenarioConfig,
) -> Result<ScenarioOutcome, AccretionError> {
    config.validate()?;
    let trajectory = AnnualSimulationDriver::new(&config.params, &config.seasons).run(forced)?;
    let estimator = CriticalStateEstimator::new(config.estimator)?;
    let table = estimator.merge(&trajectory, forced.slr_scenario())?;
    let metrics = estimator.estimate(&table)?;
    Ok(ScenarioOutcome {
        trajectory,
        table,
        metrics,
    })
}
