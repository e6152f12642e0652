//! RewardedAdapter - Rewarded video loading, presentation and reward grant.
//!
//! Rewarded ads render into a fullscreen surface that is constructed once
//! per zone and shared by every adapter instance for that zone. The reward
//! is granted when the ad is hidden, and only if the video was watched to
//! the end and the network verified the reward.
//!
//! A loaded video outlives the adapter that loaded it: it is parked in the
//! context per zone, served to the next adapter without a fetch and
//! consumed by the first `show`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{BridgeContext, CapabilityNegotiator, SinkRelay};
use crate::domain::foundation::{AdHandle, BridgeError, StateMachine, ZoneKey};
use crate::domain::request::{
    resolve_request_zone, AdFormat, AdSize, HostContext, NetworkExtras, RequestStatus, RewardItem,
    ZoneFallback,
};
use crate::ports::{
    AdClickListener, AdDisplayListener, FullscreenListeners, LoadedAd, MediationSink, Presentation,
    RewardListener, Surface, SurfaceRequest, UiDispatcher, VideoPlaybackListener,
};

#[derive(Debug, Clone)]
pub struct RewardedRequest {
    pub host: HostContext,
    pub extras: NetworkExtras,
}

impl RewardedRequest {
    pub fn new(host: HostContext) -> Self {
        Self {
            host,
            extras: NetworkExtras::new(),
        }
    }

    pub fn with_extras(mut self, extras: NetworkExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.extras.insert(NetworkExtras::ZONE_ID, zone_id);
        self
    }
}

/// One rewarded video request and its presentation.
pub struct RewardedAdapter {
    context: Arc<BridgeContext>,
    negotiator: Arc<CapabilityNegotiator>,
    ui: Arc<dyn UiDispatcher>,
    fallback: ZoneFallback,
    status: RequestStatus,
    zone: ZoneKey,
    host: Option<HostContext>,
    surface: Option<Arc<dyn Surface>>,
    loaded: Option<AdHandle>,
    relay: Option<SinkRelay>,
}

impl RewardedAdapter {
    pub fn new(
        context: Arc<BridgeContext>,
        negotiator: Arc<CapabilityNegotiator>,
        ui: Arc<dyn UiDispatcher>,
        fallback: ZoneFallback,
    ) -> Self {
        Self {
            context,
            negotiator,
            ui,
            fallback,
            status: RequestStatus::Idle,
            zone: ZoneKey::default_zone(),
            host: None,
            surface: None,
            loaded: None,
            relay: None,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn zone(&self) -> &ZoneKey {
        &self.zone
    }

    /// Returns true once an ad is loaded and no instance has shown it yet.
    pub fn is_ready(&self) -> bool {
        self.status == RequestStatus::Fulfilled
            && self
                .loaded
                .as_ref()
                .is_some_and(|ad| self.context.ready_fullscreen(&self.zone).as_ref() == Some(ad))
    }

    /// Loads one rewarded video and reports the outcome.
    pub async fn request_ad(&mut self, request: RewardedRequest, sink: MediationSink) -> RequestStatus {
        if self.status != RequestStatus::Idle {
            tracing::warn!(status = %self.status, "Rewarded adapter reused, ignoring request");
            return self.status;
        }

        let relay = SinkRelay::new(sink, self.ui.clone());
        self.relay = Some(relay.clone());

        match self.load(request).await {
            Ok(ad) => {
                tracing::info!(zone = %self.zone, ad = %ad, "Rewarded video loaded");
                self.loaded = Some(ad.clone());
                relay.loaded(LoadedAd::Fullscreen(ad));
            }
            Err(error) => {
                if self.status.can_transition_to(&RequestStatus::Failed) {
                    self.status = RequestStatus::Failed;
                }
                relay.failed(&error);
            }
        }
        self.status
    }

    /// Presents the loaded video.
    ///
    /// # Errors
    ///
    /// `Internal` when no ad is loaded. The failure is also reported to
    /// the sink if the request has not reported an outcome yet.
    pub fn show(&mut self) -> Result<(), BridgeError> {
        let (Some(ad), Some(host), Some(relay)) = (self.loaded.clone(), self.host.clone(), self.relay.clone())
        else {
            return Err(self.show_before_load());
        };
        if self.status != RequestStatus::Fulfilled {
            return Err(self.show_before_load());
        }
        if !self.context.take_fullscreen(&self.zone, &ad) {
            tracing::warn!(zone = %self.zone, ad = %ad, "Rewarded video already shown by another instance");
            return Err(self.show_before_load());
        }

        let session = Arc::new(RewardSession::new(relay));
        let presentation = Presentation {
            host,
            surface: self.surface.clone(),
            listeners: FullscreenListeners::new(session.clone(), session.clone())
                .with_playback(session.clone())
                .with_reward(session),
        };

        if let Err(error) = self.negotiator.show(&ad, &self.zone, &presentation) {
            self.context.park_fullscreen(&self.zone, ad);
            return Err(error);
        }
        self.status = self
            .status
            .transition_to(RequestStatus::Rendering)
            .map_err(|err| BridgeError::internal(err.to_string()))?;
        Ok(())
    }

    /// Pauses the shared surface for this zone.
    pub fn pause(&self) {
        if let Some(surface) = &self.surface {
            surface.pause();
        }
    }

    pub fn resume(&self) {
        if let Some(surface) = &self.surface {
            surface.resume();
        }
    }

    async fn load(&mut self, request: RewardedRequest) -> Result<AdHandle, BridgeError> {
        self.negotiator.check_host(AdFormat::Rewarded, &request.host)?;
        self.zone = resolve_request_zone(
            request.extras.requested_zone(),
            self.negotiator.level(),
            self.fallback,
        )?;
        self.advance(RequestStatus::Requesting)?;

        let surface_request = SurfaceRequest::fullscreen(AdFormat::Rewarded, request.host.clone());
        let negotiator = self.negotiator.clone();
        let zone = self.zone.clone();
        let surface = self.context.fullscreen_surfaces().get_or_create(
            &self.zone,
            Box::new(move || negotiator.create_surface(&surface_request, &zone)),
        )?;
        self.surface = Some(surface);
        self.host = Some(request.host);

        if let Some(ad) = self.context.ready_fullscreen(&self.zone) {
            tracing::debug!(zone = %self.zone, ad = %ad, "Rewarded video already loaded, skipping fetch");
            self.advance(RequestStatus::Fulfilled)?;
            return Ok(ad);
        }

        let ad = self.negotiator.fetch(&self.zone, AdSize::Interstitial).await?;
        self.context.park_fullscreen(&self.zone, ad.clone());
        self.advance(RequestStatus::Fulfilled)?;
        Ok(ad)
    }

    fn show_before_load(&self) -> BridgeError {
        tracing::error!(status = %self.status, "Rewarded video shown before one was loaded");
        let error = BridgeError::internal("show called before an ad was loaded");
        if let Some(relay) = &self.relay {
            relay.failed(&error);
        }
        error
    }

    fn advance(&mut self, target: RequestStatus) -> Result<(), BridgeError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|err| BridgeError::internal(err.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for RewardedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardedAdapter")
            .field("status", &self.status)
            .field("zone", &self.zone)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// Tracks one presentation until the ad is hidden.
struct RewardSession {
    relay: SinkRelay,
    fully_watched: AtomicBool,
    reward: Mutex<Option<RewardItem>>,
}

impl RewardSession {
    fn new(relay: SinkRelay) -> Self {
        Self {
            relay,
            fully_watched: AtomicBool::new(false),
            reward: Mutex::new(None),
        }
    }

    fn take_reward(&self) -> Option<RewardItem> {
        self.reward.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl AdDisplayListener for RewardSession {
    fn ad_displayed(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Rewarded video displayed");
        self.relay.opened();
    }

    fn ad_hidden(&self, ad: &AdHandle) {
        let fully_watched = self.fully_watched.load(Ordering::SeqCst);
        match self.take_reward() {
            Some(reward) if fully_watched => {
                tracing::info!(ad = %ad, amount = reward.amount, currency = %reward.currency, "Reward granted");
                self.relay.rewarded(reward);
            }
            _ => tracing::debug!(ad = %ad, fully_watched, "Rewarded video closed without reward"),
        }
        self.relay.closed();
    }
}

impl AdClickListener for RewardSession {
    fn ad_clicked(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Rewarded video clicked");
        self.relay.clicked();
        self.relay.left_application();
    }
}

impl VideoPlaybackListener for RewardSession {
    fn playback_began(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Rewarded video playback began");
        self.relay.video_started();
    }

    fn playback_ended(&self, ad: &AdHandle, percent_viewed: f64, fully_watched: bool) {
        tracing::debug!(ad = %ad, percent_viewed, fully_watched, "Rewarded video playback ended");
        self.fully_watched.store(fully_watched, Ordering::SeqCst);
    }
}

impl RewardListener for RewardSession {
    fn reward_verified(&self, ad: &AdHandle, response: &HashMap<String, String>) {
        match RewardItem::from_verification(response) {
            Some(item) => {
                tracing::debug!(ad = %ad, amount = item.amount, "Reward verified");
                *self.reward.lock().unwrap_or_else(PoisonError::into_inner) = Some(item);
            }
            None => tracing::warn!(ad = %ad, ?response, "Reward verified without a usable amount"),
        }
    }

    fn reward_over_quota(&self, ad: &AdHandle, response: &HashMap<String, String>) {
        tracing::warn!(ad = %ad, ?response, "Reward over quota");
    }

    fn reward_rejected(&self, ad: &AdHandle, response: &HashMap<String, String>) {
        tracing::warn!(ad = %ad, ?response, "Reward rejected");
    }

    fn validation_failed(&self, ad: &AdHandle, code: i32) {
        tracing::warn!(ad = %ad, code, "Reward validation failed");
    }

    fn user_declined(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "User declined to view rewarded video");
    }
}
