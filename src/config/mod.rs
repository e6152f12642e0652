//! Bridge configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEDIATION_BRIDGE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working bridge.
//!
//! # Example
//!
//! ```no_run
//! use mediation_bridge::config::BridgeConfig;
//!
//! let config = BridgeConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Zone fallback: {:?}", config.zones.fallback);
//! ```

mod error;
mod logging;
mod sdk;
mod zones;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use sdk::SdkConfig;
pub use zones::ZonesConfig;

use serde::Deserialize;

/// Root bridge configuration
///
/// Load using [`BridgeConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// Ad network SDK settings (version override, plugin id)
    #[serde(default)]
    pub sdk: SdkConfig,

    /// Zone fallback policy
    #[serde(default)]
    pub zones: ZonesConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEDIATION_BRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEDIATION_BRIDGE__SDK__VERSION_CODE=740` -> `sdk.version_code = 740`
    /// - `MEDIATION_BRIDGE__ZONES__FALLBACK=reject` -> `zones.fallback = reject`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDIATION_BRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sdk.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
