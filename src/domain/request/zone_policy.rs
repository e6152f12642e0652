//! What happens to a requested zone when the SDK cannot serve zones.

use serde::{Deserialize, Serialize};

use crate::domain::capability::{CapabilityLevel, Operation};
use crate::domain::foundation::{ConfigurationError, ZoneKey};

/// Policy applied when a named zone is requested on a zone-unaware SDK.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneFallback {
    /// Use the default partition for fetching, caching and surfaces alike.
    #[default]
    FoldIntoDefault,
    /// Fail the request with a configuration error.
    Reject,
}

/// Resolves the zone an adapter instance works with for its whole request.
///
/// The result keys the fetch, the inventory cache and the surface registry,
/// so a downgraded request never lands in a partition the SDK cannot serve.
pub fn resolve_request_zone(
    requested: ZoneKey,
    level: CapabilityLevel,
    fallback: ZoneFallback,
) -> Result<ZoneKey, ConfigurationError> {
    if requested.is_default() || level.supports_zones() {
        return Ok(requested);
    }

    match fallback {
        ZoneFallback::FoldIntoDefault => Ok(ZoneKey::default_zone()),
        ZoneFallback::Reject => Err(ConfigurationError::CapabilityUnavailable {
            operation: Operation::Fetch,
            zone: requested,
        }),
    }
}
