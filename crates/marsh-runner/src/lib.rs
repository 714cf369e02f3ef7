//! # marsh-runner
//!
//! Scenario execution for the `xmarsh` command line tool.
//!
//! - [`run_one`] runs a single scenario on loaded inputs
//! - [`run_sweep`] runs a [`SweepPlan`] in parallel with rayon
//! - [`render`] and [`property_table`] format results for output

mod error;
mod report;
mod scenario;
mod sweep;

pub use error::RunnerError;
pub use report::{emit, property_table, render, OutputFormat};
pub use scenario::{run_one, ScenarioId, ScenarioReport, ScenarioSpec};
pub use sweep::{load_inputs, run_sweep, SweepFailure, SweepPlan, SweepResults};

use marsh_model::properties::ResolvedProperties;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Initialize logging.
///
/// `RUST_LOG` takes precedence; otherwise `level` (default `info`) applies to
/// the marsh crates and `warn` to everything else.
pub fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.unwrap_or("info");
        EnvFilter::new(format!(
            "warn,xmarsh={level},marsh_runner={level},marsh_accretion={level},marsh_data={level},marsh_model={level}"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve properties from an optional YAML file and `key=value` overrides.
pub fn resolve_properties(config: Option<&Path>, overrides: &[String]) -> Result<ResolvedProperties> {
    let mut props = match config {
        Some(path) => ResolvedProperties::from_yaml_file(path)?,
        None => ResolvedProperties::new(),
    };
    for assignment in overrides {
        props.apply_override(assignment)?;
    }
    Ok(props)
}
