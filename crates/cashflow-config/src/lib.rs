//! Configuration management for cashflow
//!
//! This module handles loading and validation of cashflow configuration
//! from YAML files. Every field carries a serde default so a partial (or
//! absent) file still yields a usable configuration.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Document database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database name holding the accounts and transactions collections
    #[serde(default = "default_database_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_database_name(),
        }
    }
}

fn default_database_name() -> String {
    "cashflow".to_string()
}

/// Client-side settings for ledger sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the ledger API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Seconds a status banner stays visible before auto-dismissal
    #[serde(default = "default_banner_dismiss_secs")]
    pub banner_dismiss_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            banner_dismiss_secs: default_banner_dismiss_secs(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_banner_dismiss_secs() -> u64 {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Client session settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.database.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.name".to_string(),
                reason: "Database name must not be empty".to_string(),
            });
        }

        if self.client.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "client.api_url".to_string(),
                reason: "API base URL must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.name, "cashflow");
        assert_eq!(config.client.api_url, "http://localhost:5000");
        assert_eq!(config.client.banner_dismiss_secs, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.name, "cashflow");
    }

    #[test]
    fn test_zero_port_rejected() {
        let config: Config = serde_yaml::from_str("server:\n  port: 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_database_name_rejected() {
        let config: Config = serde_yaml::from_str("database:\n  name: \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
