//! Error types for the runner.

use marsh_accretion::AccretionError;
use marsh_data::LoadError;
use marsh_model::ConfigError;
use thiserror::Error;

/// Errors that can occur while running scenarios.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Invalid configuration or override.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input tables could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// The simulation or estimation failed.
    #[error("Scenario failed: {0}")]
    Accretion(#[from] AccretionError),

    /// I/O error reading a plan or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or render error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON render error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A sweep plan is unusable.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
}
