//! Service configuration, loaded from TOML.
//!
//! Every section and field is optional; anything missing falls back to the
//! defaults below.
//!
//! ```toml
//! [timeout]
//! default = 60
//! min = 1
//! max = 600
//!
//! [search]
//! workers = 4
//! edge_order = "target_out_degree"
//! start_order = "surplus_first"
//!
//! [logging]
//! filter = "catena=debug"
//! ```

use std::fs;
use std::path::Path;

use catena_search::SearchPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid timeout bounds: min {min}, default {default}, max {max}")]
    TimeoutBounds { min: u64, default: u64, max: u64 },
}

/// Timeout handling for incoming requests, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Used when a request carries no usable timeout.
    pub default: u64,
    pub min: u64,
    pub max: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default: 60,
            min: 1,
            max: 600,
        }
    }
}

impl TimeoutConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeoutBounds`] unless
    /// `1 <= min <= default <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.default || self.default > self.max {
            return Err(ConfigError::TimeoutBounds {
                min: self.min,
                default: self.default,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub timeout: TimeoutConfig,
    pub search: SearchPolicy,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or wrongly typed
    /// fields, and [`ConfigError::TimeoutBounds`] for inconsistent bounds.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.timeout.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `path`, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.as_ref().display(), error = %e, "using default config");
                Self::default()
            }
        }
    }
}
