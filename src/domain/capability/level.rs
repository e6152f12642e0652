//! Capability levels of the installed ad network SDK.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::request::AdFormat;

/// Version information reported by the installed ad network SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkDescriptor {
    /// Numeric SDK version, e.g. `750` for 7.5.0.
    pub version_code: u32,
}

impl SdkDescriptor {
    pub fn new(version_code: u32) -> Self {
        Self { version_code }
    }

    /// Resolves the capability level for this SDK version.
    pub fn capability_level(&self) -> CapabilityLevel {
        CapabilityLevel::from_version_code(self.version_code)
    }
}

/// The set of call shapes the installed SDK actually supports.
///
/// Levels are ordered: every level supports everything the previous
/// level does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityLevel {
    /// Below 7.1.0: every format needs an activity to host it.
    ActivityBound,
    /// 7.1.0 up to 7.2.0: banners accept any context, fullscreen formats still
    /// need an activity.
    ContextBanners,
    /// 7.2.0 up to 7.5.0: any context for every format, no zones.
    ContextAware,
    /// 7.5.0 and above: zone-aware overloads are available.
    ZoneAware,
}

impl CapabilityLevel {
    pub const CONTEXT_BANNERS_SINCE: u32 = 710;
    pub const CONTEXT_AWARE_SINCE: u32 = 720;
    pub const ZONE_AWARE_SINCE: u32 = 750;

    pub fn from_version_code(version_code: u32) -> Self {
        if version_code >= Self::ZONE_AWARE_SINCE {
            CapabilityLevel::ZoneAware
        } else if version_code >= Self::CONTEXT_AWARE_SINCE {
            CapabilityLevel::ContextAware
        } else if version_code >= Self::CONTEXT_BANNERS_SINCE {
            CapabilityLevel::ContextBanners
        } else {
            CapabilityLevel::ActivityBound
        }
    }

    /// Returns true if zone-aware overloads can be called.
    pub fn supports_zones(&self) -> bool {
        *self >= CapabilityLevel::ZoneAware
    }

    /// Returns true if hosting `format` requires an activity context.
    pub fn requires_activity(&self, format: AdFormat) -> bool {
        match self {
            CapabilityLevel::ActivityBound => true,
            CapabilityLevel::ContextBanners => format.is_fullscreen(),
            CapabilityLevel::ContextAware | CapabilityLevel::ZoneAware => false,
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityLevel::ActivityBound => "activity_bound",
            CapabilityLevel::ContextBanners => "context_banners",
            CapabilityLevel::ContextAware => "context_aware",
            CapabilityLevel::ZoneAware => "zone_aware",
        };
        write!(f, "{}", s)
    }
}
