//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifies an inventory partition on the ad network.
///
/// The empty string denotes the default partition. Two keys are equal when
/// their strings are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneKey(String);

impl ZoneKey {
    /// Creates a zone key from any string; an empty string is the default zone.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the default (zone-less) partition.
    pub fn default_zone() -> Self {
        Self(String::new())
    }

    /// Creates a zone key from an optional request parameter.
    ///
    /// Absent or empty parameters resolve to the default zone.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::default_zone(),
        }
    }

    /// Returns true if this is the default partition.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the zone id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            write!(f, "<default>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for ZoneKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ZoneKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Network-assigned identifier of a fetched ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdId(u64);

impl AdId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a fetched-but-undisplayed ad.
///
/// The bridge never interprets the ad; it only moves the handle between the
/// network, the inventory cache and a surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdHandle {
    id: AdId,
}

impl AdHandle {
    pub fn new(id: AdId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> AdId {
        self.id
    }
}

impl From<u64> for AdHandle {
    fn from(id: u64) -> Self {
        Self::new(AdId::new(id))
    }
}

impl fmt::Display for AdHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ad#{}", self.id)
    }
}

/// Identity of a display surface instance.
///
/// Used to tell apart a surface rebuilt after teardown from the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Creates a new random SurfaceId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SurfaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_zone_is_default() {
        assert!(ZoneKey::new("").is_default());
        assert!(ZoneKey::default().is_default());
        assert_eq!(ZoneKey::default_zone(), ZoneKey::new(""));
    }

    #[test]
    fn named_zone_is_not_default() {
        let zone = ZoneKey::new("rewarded1");
        assert!(!zone.is_default());
        assert_eq!(zone.as_str(), "rewarded1");
    }

    #[test]
    fn zone_from_param_treats_missing_and_empty_as_default() {
        assert!(ZoneKey::from_param(None).is_default());
        assert!(ZoneKey::from_param(Some("")).is_default());
        assert_eq!(ZoneKey::from_param(Some("banner_top")), ZoneKey::new("banner_top"));
    }

    #[test]
    fn zone_equality_is_by_value() {
        assert_eq!(ZoneKey::from("a"), ZoneKey::new(String::from("a")));
        assert_ne!(ZoneKey::from("a"), ZoneKey::from("b"));
    }

    #[test]
    fn zone_display_names_default_partition() {
        assert_eq!(format!("{}", ZoneKey::default_zone()), "<default>");
        assert_eq!(format!("{}", ZoneKey::new("z1")), "z1");
    }

    #[test]
    fn ad_handle_display_uses_id() {
        let ad = AdHandle::from(42);
        assert_eq!(ad.id().as_u64(), 42);
        assert_eq!(format!("{}", ad), "ad#42");
    }

    #[test]
    fn surface_ids_are_unique() {
        assert_ne!(SurfaceId::new(), SurfaceId::new());
    }

    #[test]
    fn surface_id_parses_from_string() {
        let id = SurfaceId::new();
        let parsed: SurfaceId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
