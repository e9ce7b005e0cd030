//! System configuration loading and validation

use crate::core::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// System-wide configuration parameters.
///
/// The registry capacity and solve quorum are fixed by design and not
/// exposed here; configuration covers the collaborator boundary only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// WebSocket endpoint of the beacon stream
    pub endpoint: String,
    /// Enable debug-level logging regardless of the environment filter
    pub debug_logging: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug_logging: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    Io { message: String },
    /// JSON serialization/deserialization error
    Serialization { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid {} = {}: {}", parameter, value, reason)
            }
            ConfigError::Io { message } => write!(f, "Configuration I/O error: {}", message),
            ConfigError::Serialization { message } => {
                write!(f, "Configuration format error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SystemConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: e.to_string(),
        })?;
        let config: SystemConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Serialization {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("ws://") && !self.endpoint.starts_with("wss://") {
            return Err(ConfigError::InvalidParameter {
                parameter: "endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: "must be a ws:// or wss:// URI".to_string(),
            });
        }
        Ok(())
    }
}
