//! Mediation sink - Callbacks the bridge reports back to the mediation layer.
//!
//! The mediation layer's listener contract is split into single-purpose
//! traits. The orchestration layer composes them into a `MediationSink`
//! and always invokes them on the UI context.

use std::sync::Arc;

use super::Surface;
use crate::domain::foundation::{AdHandle, MediationErrorCode};
use crate::domain::request::RewardItem;

/// What a successful load hands to the mediation layer.
#[derive(Debug, Clone)]
pub enum LoadedAd {
    /// A banner surface with the ad rendered or queued for it.
    Surface(Arc<dyn Surface>),
    /// A fullscreen ad waiting for `show`.
    Fullscreen(AdHandle),
}

/// Load outcome. Exactly one of these fires per request.
pub trait LoadCallbacks: Send + Sync {
    fn on_loaded(&self, ad: LoadedAd);

    fn on_failed_to_load(&self, code: MediationErrorCode);
}

pub trait DisplayCallbacks: Send + Sync {
    fn on_opened(&self);

    fn on_closed(&self);
}

pub trait ClickCallbacks: Send + Sync {
    fn on_clicked(&self);

    fn on_left_application(&self);
}

/// Rewarded-format extras.
pub trait RewardCallbacks: Send + Sync {
    fn on_video_started(&self);

    fn on_rewarded(&self, reward: RewardItem);
}

/// The callback roles of one mediation request, composed.
#[derive(Clone)]
pub struct MediationSink {
    pub load: Arc<dyn LoadCallbacks>,
    pub display: Arc<dyn DisplayCallbacks>,
    pub click: Arc<dyn ClickCallbacks>,
    pub reward: Option<Arc<dyn RewardCallbacks>>,
}

impl MediationSink {
    pub fn new(
        load: Arc<dyn LoadCallbacks>,
        display: Arc<dyn DisplayCallbacks>,
        click: Arc<dyn ClickCallbacks>,
    ) -> Self {
        Self {
            load,
            display,
            click,
            reward: None,
        }
    }

    /// Builds a sink from one object implementing every non-reward role.
    pub fn from_listener<T>(listener: Arc<T>) -> Self
    where
        T: LoadCallbacks + DisplayCallbacks + ClickCallbacks + 'static,
    {
        Self::new(listener.clone(), listener.clone(), listener)
    }

    /// Builds a sink from one object implementing every role.
    pub fn from_rewarded_listener<T>(listener: Arc<T>) -> Self
    where
        T: LoadCallbacks + DisplayCallbacks + ClickCallbacks + RewardCallbacks + 'static,
    {
        Self::from_listener(listener.clone()).with_reward(listener)
    }

    pub fn with_reward(mut self, reward: Arc<dyn RewardCallbacks>) -> Self {
        self.reward = Some(reward);
        self
    }
}

impl std::fmt::Debug for MediationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediationSink")
            .field("reward", &self.reward.is_some())
            .finish_non_exhaustive()
    }
}
