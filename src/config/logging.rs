//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Install the bridge's own subscriber
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.level"));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: default_level(),
            json: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}
