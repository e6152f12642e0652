//! Ad network SDK configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::capability::SdkDescriptor;

/// SDK configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    /// Overrides the version the SDK reports about itself
    pub version_code: Option<u32>,

    /// Plugin identifier forwarded to the SDK
    #[serde(default = "default_plugin_version")]
    pub plugin_version: String,
}

impl SdkConfig {
    /// Picks the configured override or falls back to what the SDK reports
    pub fn effective_descriptor(&self, reported: SdkDescriptor) -> SdkDescriptor {
        self.version_code.map(SdkDescriptor::new).unwrap_or(reported)
    }

    /// Validate SDK configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.plugin_version.trim().is_empty() {
            return Err(ValidationError::MissingRequired("sdk.plugin_version"));
        }
        if self.version_code == Some(0) {
            return Err(ValidationError::InvalidVersionCode(0));
        }
        Ok(())
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            version_code: None,
            plugin_version: default_plugin_version(),
        }
    }
}

fn default_plugin_version() -> String {
    "AdMob-2.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_config_defaults() {
        let config = SdkConfig::default();
        assert_eq!(config.version_code, None);
        assert_eq!(config.plugin_version, "AdMob-2.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_override_wins_over_reported_version() {
        let config = SdkConfig {
            version_code: Some(720),
            ..Default::default()
        };
        assert_eq!(
            config.effective_descriptor(SdkDescriptor::new(760)),
            SdkDescriptor::new(720)
        );
        assert_eq!(
            SdkConfig::default().effective_descriptor(SdkDescriptor::new(760)),
            SdkDescriptor::new(760)
        );
    }

    #[test]
    fn test_validation_rejects_blank_plugin_version() {
        let config = SdkConfig {
            plugin_version: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_version() {
        let config = SdkConfig {
            version_code: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidVersionCode(0))
        ));
    }
}
