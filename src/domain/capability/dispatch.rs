//! Dispatch table from (operation, capability level) to a concrete call shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CapabilityLevel;
use crate::domain::foundation::{ConfigurationError, ZoneKey};

/// Zone-scoped operations the bridge performs against the ad network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Fetch the next ad for a zone.
    Fetch,
    /// Show a loaded ad with zone-scoped parameters.
    Show,
    /// Construct a display surface bound to a zone.
    CreateSurface,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Fetch => "fetch",
            Operation::Show => "show",
            Operation::CreateSurface => "create_surface",
        };
        write!(f, "{}", s)
    }
}

/// Which SDK signature to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// The zone-aware overload, called with the given zone.
    ZoneAware(ZoneKey),
    /// The zone-unaware signature; only valid for the default zone.
    Legacy,
    /// No signature can serve this zone on the installed SDK.
    Unavailable,
}

impl CallShape {
    /// Converts the unavailable branch into a checked configuration error.
    pub fn require(self, operation: Operation, zone: &ZoneKey) -> Result<CallShape, ConfigurationError> {
        match self {
            CallShape::Unavailable => Err(ConfigurationError::CapabilityUnavailable {
                operation,
                zone: zone.clone(),
            }),
            shape => Ok(shape),
        }
    }
}

/// Lowest capability level exposing the zone-aware overload of each operation.
const ZONE_OVERLOAD_SINCE: [(Operation, CapabilityLevel); 3] = [
    (Operation::Fetch, CapabilityLevel::ZoneAware),
    (Operation::Show, CapabilityLevel::ZoneAware),
    (Operation::CreateSurface, CapabilityLevel::ZoneAware),
];

/// Returns true if `level` exposes the zone-aware overload of `operation`.
pub fn has_zone_overload(operation: Operation, level: CapabilityLevel) -> bool {
    ZONE_OVERLOAD_SINCE
        .iter()
        .find(|(op, _)| *op == operation)
        .map(|(_, since)| level >= *since)
        .unwrap_or(false)
}

/// Selects the call shape for `operation` on `zone` at `level`.
///
/// The zone-aware overload wins whenever it exists, even for the default
/// zone. Without it only the default zone can be served.
pub fn resolve(operation: Operation, level: CapabilityLevel, zone: &ZoneKey) -> CallShape {
    if has_zone_overload(operation, level) {
        CallShape::ZoneAware(zone.clone())
    } else if zone.is_default() {
        CallShape::Legacy
    } else {
        CallShape::Unavailable
    }
}
