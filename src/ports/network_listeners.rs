//! Listener contracts the ad network calls back into.
//!
//! The network reports display, click, playback and reward events through
//! separate listener objects. Each role is its own trait so an adapter only
//! implements the roles its format produces.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::AdHandle;

/// Display lifecycle of a rendered ad.
pub trait AdDisplayListener: Send + Sync {
    fn ad_displayed(&self, ad: &AdHandle);

    fn ad_hidden(&self, ad: &AdHandle);
}

pub trait AdClickListener: Send + Sync {
    fn ad_clicked(&self, ad: &AdHandle);
}

/// Video playback progress for video creatives.
pub trait VideoPlaybackListener: Send + Sync {
    fn playback_began(&self, ad: &AdHandle);

    /// Playback stopped, either at the end or because the user closed the ad.
    fn playback_ended(&self, ad: &AdHandle, percent_viewed: f64, fully_watched: bool);
}

/// Server-side reward validation outcome.
///
/// Only `reward_verified` changes what the user is granted; the other
/// outcomes are informational.
pub trait RewardListener: Send + Sync {
    fn reward_verified(&self, ad: &AdHandle, response: &HashMap<String, String>);

    fn reward_over_quota(&self, _ad: &AdHandle, _response: &HashMap<String, String>) {}

    fn reward_rejected(&self, _ad: &AdHandle, _response: &HashMap<String, String>) {}

    /// Validation could not complete; `code` is the raw network code.
    fn validation_failed(&self, _ad: &AdHandle, _code: i32) {}

    fn user_declined(&self, _ad: &AdHandle) {}
}

/// Listener set handed to the network when presenting a fullscreen ad.
#[derive(Clone)]
pub struct FullscreenListeners {
    pub display: Arc<dyn AdDisplayListener>,
    pub click: Arc<dyn AdClickListener>,
    pub playback: Option<Arc<dyn VideoPlaybackListener>>,
    pub reward: Option<Arc<dyn RewardListener>>,
}

impl FullscreenListeners {
    pub fn new(display: Arc<dyn AdDisplayListener>, click: Arc<dyn AdClickListener>) -> Self {
        Self {
            display,
            click,
            playback: None,
            reward: None,
        }
    }

    pub fn with_playback(mut self, playback: Arc<dyn VideoPlaybackListener>) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn with_reward(mut self, reward: Arc<dyn RewardListener>) -> Self {
        self.reward = Some(reward);
        self
    }
}

impl std::fmt::Debug for FullscreenListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenListeners")
            .field("playback", &self.playback.is_some())
            .field("reward", &self.reward.is_some())
            .finish_non_exhaustive()
    }
}
