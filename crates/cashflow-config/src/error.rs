//! Error types for cashflow-config

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Could not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML
    #[error("Invalid YAML in configuration file: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// A field holds a value outside its valid range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
