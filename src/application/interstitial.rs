//! InterstitialAdapter - Fetch now, present on demand.
//!
//! Interstitials bypass the inventory cache: an ad is fetched for one
//! adapter instance and shown by that same instance.

use std::sync::Arc;

use super::{CapabilityNegotiator, SinkRelay};
use crate::domain::foundation::{AdHandle, BridgeError, StateMachine, ZoneKey};
use crate::domain::request::{
    resolve_request_zone, AdFormat, AdSize, HostContext, NetworkExtras, RequestStatus, ZoneFallback,
};
use crate::ports::{
    AdClickListener, AdDisplayListener, FullscreenListeners, LoadedAd, MediationSink, Presentation,
    UiDispatcher, VideoPlaybackListener,
};

/// Parameters of one interstitial request.
#[derive(Debug, Clone)]
pub struct InterstitialRequest {
    pub host: HostContext,
    pub extras: NetworkExtras,
}

impl InterstitialRequest {
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

/// One interstitial request and its presentation.
pub struct InterstitialAdapter {
    negotiator: Arc<CapabilityNegotiator>,
    ui: Arc<dyn UiDispatcher>,
    fallback: ZoneFallback,
    status: RequestStatus,
    zone: ZoneKey,
    host: Option<HostContext>,
    loaded: Option<AdHandle>,
    relay: Option<SinkRelay>,
}

impl InterstitialAdapter {
    pub fn new(
        negotiator: Arc<CapabilityNegotiator>,
        ui: Arc<dyn UiDispatcher>,
        fallback: ZoneFallback,
    ) -> Self {
        Self {
            negotiator,
            ui,
            fallback,
            status: RequestStatus::Idle,
            zone: ZoneKey::default_zone(),
            host: None,
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

    /// Fetches one interstitial and reports the outcome.
    pub async fn request_ad(&mut self, request: InterstitialRequest, sink: MediationSink) -> RequestStatus {
        if self.status != RequestStatus::Idle {
            tracing::warn!(status = %self.status, "Interstitial adapter reused, ignoring request");
            return self.status;
        }

        let relay = SinkRelay::new(sink, self.ui.clone());
        self.relay = Some(relay.clone());

        match self.load(request).await {
            Ok(ad) => {
                tracing::debug!(zone = %self.zone, ad = %ad, "Interstitial loaded");
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

    /// Presents the loaded interstitial.
    ///
    /// Showing before a load completed is reported to the sink as an
    /// internal error when the request has not reported yet.
    pub fn show(&mut self) -> Result<(), BridgeError> {
        let (Some(ad), Some(host), Some(relay)) = (self.loaded.clone(), self.host.clone(), self.relay.clone())
        else {
            return Err(self.show_before_load());
        };
        if self.status != RequestStatus::Fulfilled {
            return Err(self.show_before_load());
        }

        let events = Arc::new(InterstitialEvents { relay });
        let presentation = Presentation {
            host,
            surface: None,
            listeners: FullscreenListeners::new(events.clone(), events.clone()).with_playback(events),
        };

        self.negotiator.show(&ad, &self.zone, &presentation)?;
        self.status = self
            .status
            .transition_to(RequestStatus::Rendering)
            .map_err(|err| BridgeError::internal(err.to_string()))?;
        Ok(())
    }

    async fn load(&mut self, request: InterstitialRequest) -> Result<AdHandle, BridgeError> {
        self.negotiator.check_host(AdFormat::Interstitial, &request.host)?;
        self.zone = resolve_request_zone(
            request.extras.requested_zone(),
            self.negotiator.level(),
            self.fallback,
        )?;
        self.host = Some(request.host);
        self.advance(RequestStatus::Requesting)?;

        let ad = self.negotiator.fetch(&self.zone, AdSize::Interstitial).await?;
        self.advance(RequestStatus::Fulfilled)?;
        Ok(ad)
    }

    fn show_before_load(&self) -> BridgeError {
        tracing::error!(status = %self.status, "Interstitial shown before one was loaded");
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

impl std::fmt::Debug for InterstitialAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterstitialAdapter")
            .field("status", &self.status)
            .field("zone", &self.zone)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

struct InterstitialEvents {
    relay: SinkRelay,
}

impl AdDisplayListener for InterstitialEvents {
    fn ad_displayed(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Interstitial displayed");
        self.relay.opened();
    }

    fn ad_hidden(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Interstitial dismissed");
        self.relay.closed();
    }
}

impl AdClickListener for InterstitialEvents {
    fn ad_clicked(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Interstitial clicked");
        self.relay.clicked();
        self.relay.left_application();
    }
}

impl VideoPlaybackListener for InterstitialEvents {
    fn playback_began(&self, ad: &AdHandle) {
        tracing::debug!(ad = %ad, "Interstitial video playback began");
    }

    fn playback_ended(&self, ad: &AdHandle, percent_viewed: f64, _fully_watched: bool) {
        tracing::debug!(ad = %ad, percent_viewed, "Interstitial video playback ended");
    }
}
