//! Zone handling configuration

use serde::Deserialize;

use crate::domain::request::ZoneFallback;

/// Zone configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZonesConfig {
    /// What to do with a named zone the installed SDK cannot serve
    #[serde(default)]
    pub fallback: ZoneFallback,
}
