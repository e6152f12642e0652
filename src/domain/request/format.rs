//! Ad formats and hosting contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ad formats the bridge mediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    Banner,
    Interstitial,
    Rewarded,
}

impl AdFormat {
    /// Fullscreen formats take over the screen instead of living in a view.
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, AdFormat::Interstitial | AdFormat::Rewarded)
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdFormat::Banner => "banner",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
        };
        write!(f, "{}", s)
    }
}

/// The kind of host context the mediation layer handed to the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    /// A screen-owning context (an activity or view controller).
    Activity,
    /// Any other context, such as the application itself.
    Application,
}

/// Opaque host context passed through to the ad network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostContext {
    kind: HostKind,
    name: String,
}

impl HostContext {
    pub fn activity(name: impl Into<String>) -> Self {
        Self {
            kind: HostKind::Activity,
            name: name.into(),
        }
    }

    pub fn application(name: impl Into<String>) -> Self {
        Self {
            kind: HostKind::Application,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> HostKind {
        self.kind
    }

    pub fn is_activity(&self) -> bool {
        self.kind == HostKind::Activity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.name)
    }
}
