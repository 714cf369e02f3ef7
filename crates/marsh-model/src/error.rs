//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur while resolving model properties.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or structure error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A key does not name any known property or alias.
    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    /// A value does not match the declared type of its property.
    #[error("Property '{name}' expects {expected}, got '{found}'")]
    TypeMismatch {
        /// Canonical property name.
        name: &'static str,
        /// Declared type.
        expected: String,
        /// The rejected value.
        found: String,
    },

    /// An override was not of the form `key=value`.
    #[error("Invalid override '{0}' (expected key=value)")]
    InvalidOverride(String),

    /// The YAML document root is not a mapping.
    #[error("Configuration root must be a mapping of property names to values")]
    NotAMapping,
}
