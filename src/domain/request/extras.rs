//! Per-request network extras supplied by the publisher.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::ZoneKey;

/// Optional string-keyed bag passed along with each ad request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkExtras {
    values: HashMap<String, String>,
}

impl NetworkExtras {
    /// Key carrying the zone id of the request.
    pub const ZONE_ID: &'static str = "zone_id";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> NetworkExtrasBuilder {
        NetworkExtrasBuilder::default()
    }

    /// Decodes extras from a JSON object of string values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw zone id, if the publisher supplied one.
    pub fn zone_id(&self) -> Option<&str> {
        self.get(Self::ZONE_ID)
    }

    /// Zone requested through the extras; missing or empty means default.
    pub fn requested_zone(&self) -> ZoneKey {
        ZoneKey::from_param(self.zone_id())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for [`NetworkExtras`].
#[derive(Debug, Default)]
pub struct NetworkExtrasBuilder {
    zone_id: Option<String>,
    custom: HashMap<String, String>,
}

impl NetworkExtrasBuilder {
    /// Sets the zone id to be used for ad requests.
    pub fn zone_id(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> NetworkExtras {
        let mut values = self.custom;
        if let Some(zone_id) = self.zone_id {
            values.insert(NetworkExtras::ZONE_ID.to_string(), zone_id);
        }
        NetworkExtras { values }
    }
}
