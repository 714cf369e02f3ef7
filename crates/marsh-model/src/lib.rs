//! # marsh-model
//!
//! Property-based configuration for the X-Marsh simulator.
//!
//! Every tunable value of the model (physical parameters, seasonal
//! coefficients, estimator constants) is declared once as a typed
//! [`properties::Property`] with a default, unit and description. A
//! [`properties::ResolvedProperties`] starts from the defaults and can be
//! overlaid from YAML files or `key=value` overrides.
//!
//! ```
//! use marsh_model::properties::{ResolvedProperties, ACCRETION_C_FLOOD, ACCRETION_Z_INIT};
//!
//! let yaml = r#"
//! accretion:
//!   z_init: 0.8
//! c_flood: 0.05
//! "#;
//! let props = ResolvedProperties::from_yaml_str(yaml)?;
//! assert_eq!(props.get(&ACCRETION_Z_INIT), 0.8);
//! assert_eq!(props.get(&ACCRETION_C_FLOOD), 0.05);
//! # Ok::<(), marsh_model::ConfigError>(())
//! ```

mod error;
pub mod properties;

pub use error::ConfigError;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
