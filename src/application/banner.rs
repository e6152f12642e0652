//! BannerAdapter - One banner request from the mediation layer.
//!
//! The mediation layer builds a new adapter for every request and every
//! refresh. Each instance resolves its zone, borrows the zone's shared
//! surface, fetches through the negotiator and either renders right away
//! or parks the ad in the inventory cache for the next attach.
//!
//! ```text
//! Idle -> Requesting -> Fulfilled -> Rendering   (surface attached)
//!   |          |                \-> Enqueued    (surface detached)
//!   |          \-> Failed                       (fetch failed, cache empty)
//!   \-> Failed                                  (configuration error)
//! ```

use std::sync::Arc;

use super::{BridgeContext, CapabilityNegotiator, SinkRelay};
use crate::domain::foundation::{AdHandle, BridgeError, StateMachine, ZoneKey};
use crate::domain::request::{
    resolve_request_zone, AdFormat, AdSize, HostContext, NetworkExtras, RequestStatus,
    RequestedSize, ZoneFallback,
};
use crate::ports::{
    AdClickListener, AdDisplayListener, LoadedAd, MediationSink, Surface, SurfaceRequest,
    UiDispatcher,
};

/// Parameters of one banner request.
#[derive(Debug, Clone)]
pub struct BannerRequest {
    pub host: HostContext,
    pub size: RequestedSize,
    pub extras: NetworkExtras,
    /// Serve an MREC when no banner size matches the requested height.
    pub allow_mrec_fallback: bool,
}

impl BannerRequest {
    pub fn new(host: HostContext, size: RequestedSize) -> Self {
        Self {
            host,
            size,
            extras: NetworkExtras::new(),
            allow_mrec_fallback: false,
        }
    }

    pub fn with_extras(mut self, extras: NetworkExtras) -> Self {
        self.extras = extras;
        self
    }

    /// Targets a named zone. An empty id targets the default zone.
    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.extras.insert(NetworkExtras::ZONE_ID, zone_id);
        self
    }

    pub fn with_mrec_fallback(mut self) -> Self {
        self.allow_mrec_fallback = true;
        self
    }
}

/// Short-lived coordinator of a single banner request.
pub struct BannerAdapter {
    context: Arc<BridgeContext>,
    negotiator: Arc<CapabilityNegotiator>,
    ui: Arc<dyn UiDispatcher>,
    fallback: ZoneFallback,
    status: RequestStatus,
    zone: Option<ZoneKey>,
    surface: Option<Arc<dyn Surface>>,
}

impl BannerAdapter {
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
            zone: None,
            surface: None,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Zone this instance works with, once resolved.
    pub fn zone(&self) -> Option<&ZoneKey> {
        self.zone.as_ref()
    }

    pub fn surface(&self) -> Option<&Arc<dyn Surface>> {
        self.surface.as_ref()
    }

    /// Runs the request to completion and reports exactly one load outcome.
    ///
    /// Returns the final status. A fetch that never completes keeps this
    /// future pending; the bridge imposes no timeout of its own.
    pub async fn request_ad(&mut self, request: BannerRequest, sink: MediationSink) -> RequestStatus {
        if self.status != RequestStatus::Idle {
            tracing::warn!(status = %self.status, "Banner adapter reused, ignoring request");
            return self.status;
        }

        let relay = SinkRelay::new(sink, self.ui.clone());
        match self.run(request, &relay).await {
            Ok(status) => status,
            Err(error) => {
                if self.status.can_transition_to(&RequestStatus::Failed) {
                    self.status = RequestStatus::Failed;
                }
                relay.failed(&error);
                self.status
            }
        }
    }

    /// Forwards a host pause to the bound surface.
    pub fn pause(&self) {
        if let Some(surface) = &self.surface {
            tracing::debug!(surface = %surface.id(), "Pausing banner surface");
            surface.pause();
        }
    }

    /// Forwards a host resume to the bound surface.
    pub fn resume(&self) {
        if let Some(surface) = &self.surface {
            tracing::debug!(surface = %surface.id(), "Resuming banner surface");
            surface.resume();
        }
    }

    /// Releases this instance's hold on the surface.
    ///
    /// The surface itself stays registered for later instances.
    pub fn destroy(&mut self) {
        self.surface = None;
    }

    /// A queued ad is served before any fetch. The no-fill fallback
    /// therefore only sees ads queued while the fetch was in flight.
    async fn run(&mut self, request: BannerRequest, relay: &SinkRelay) -> Result<RequestStatus, BridgeError> {
        self.negotiator.check_host(AdFormat::Banner, &request.host)?;
        let size = AdSize::from_requested(request.size, request.allow_mrec_fallback)?;
        let zone = resolve_request_zone(
            request.extras.requested_zone(),
            self.negotiator.level(),
            self.fallback,
        )?;
        self.zone = Some(zone.clone());
        self.advance(RequestStatus::Requesting)?;

        tracing::debug!(zone = %zone, size = %size, "Requesting banner");

        let surface = self.obtain_surface(&zone, size, &request.host, relay)?;
        self.surface = Some(surface.clone());

        if let Some(status) = self.use_queued(&zone, &surface, relay)? {
            return Ok(status);
        }

        let ad = match self.negotiator.fetch(&zone, size).await {
            Ok(ad) => ad,
            Err(error) if error.is_no_fill() => {
                return match self.use_queued(&zone, &surface, relay)? {
                    Some(status) => {
                        tracing::info!(zone = %zone, status = %status, "No fill, served from queue instead");
                        Ok(status)
                    }
                    None => Err(error),
                };
            }
            Err(error) => return Err(error),
        };

        self.advance(RequestStatus::Fulfilled)?;
        let status = self.deliver(ad, &zone, &surface, relay)?;
        Ok(status)
    }

    /// Serves the request from the cache when an ad is already waiting.
    ///
    /// With the surface attached the oldest ad is rendered now. With it
    /// detached the queue is left untouched, so its order is kept for the
    /// attach that will follow.
    fn use_queued(
        &mut self,
        zone: &ZoneKey,
        surface: &Arc<dyn Surface>,
        relay: &SinkRelay,
    ) -> Result<Option<RequestStatus>, BridgeError> {
        let inventory = self.context.inventory().clone();
        if !inventory.has_ready(zone) {
            return Ok(None);
        }

        if surface.is_attached() {
            let Some(ad) = inventory.dequeue(zone) else {
                return Ok(None);
            };
            tracing::debug!(zone = %zone, ad = %ad, "Found queued ad, rendering it");
            self.advance(RequestStatus::Fulfilled)?;
            self.advance(RequestStatus::Rendering)?;
            render_on_ui(relay, surface, ad);
        } else {
            tracing::debug!(zone = %zone, "Found queued ad, leaving it for the next attach");
            self.advance(RequestStatus::Fulfilled)?;
            self.advance(RequestStatus::Enqueued)?;
        }

        relay.loaded(LoadedAd::Surface(surface.clone()));
        Ok(Some(self.status))
    }

    fn deliver(
        &mut self,
        ad: AdHandle,
        zone: &ZoneKey,
        surface: &Arc<dyn Surface>,
        relay: &SinkRelay,
    ) -> Result<RequestStatus, BridgeError> {
        if surface.is_attached() {
            tracing::debug!(zone = %zone, ad = %ad, "Rendering loaded ad");
            self.advance(RequestStatus::Rendering)?;
            render_on_ui(relay, surface, ad);
        } else {
            self.advance(RequestStatus::Enqueued)?;
            self.context.inventory().enqueue(zone, ad);
        }

        relay.loaded(LoadedAd::Surface(surface.clone()));
        Ok(self.status)
    }

    fn obtain_surface(
        &self,
        zone: &ZoneKey,
        size: AdSize,
        host: &HostContext,
        relay: &SinkRelay,
    ) -> Result<Arc<dyn Surface>, BridgeError> {
        let request = SurfaceRequest::new(AdFormat::Banner, size, host.clone());
        let negotiator = &self.negotiator;
        let surface = self
            .context
            .banner_surfaces()
            .get_or_create(zone, Box::new(|| negotiator.create_surface(&request, zone)))?;

        let events = Arc::new(BannerEvents {
            relay: relay.clone(),
            zone: zone.clone(),
        });
        surface.set_listeners(events.clone(), events);
        Ok(surface)
    }

    fn advance(&mut self, target: RequestStatus) -> Result<(), BridgeError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|err| BridgeError::internal(err.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for BannerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerAdapter")
            .field("status", &self.status)
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

fn render_on_ui(relay: &SinkRelay, surface: &Arc<dyn Surface>, ad: AdHandle) {
    let surface = surface.clone();
    relay.run_on_ui(move || surface.render(&ad));
}

/// Translates banner surface events into mediation callbacks.
struct BannerEvents {
    relay: SinkRelay,
    zone: ZoneKey,
}

impl AdDisplayListener for BannerEvents {
    fn ad_displayed(&self, ad: &AdHandle) {
        tracing::debug!(zone = %self.zone, ad = %ad, "Banner displayed");
    }

    fn ad_hidden(&self, ad: &AdHandle) {
        tracing::debug!(zone = %self.zone, ad = %ad, "Banner hidden");
    }
}

impl AdClickListener for BannerEvents {
    fn ad_clicked(&self, ad: &AdHandle) {
        tracing::debug!(zone = %self.zone, ad = %ad, "Banner clicked");
        self.relay.clicked();
        self.relay.opened();
        self.relay.left_application();
    }
}

/// Outcome of handling a surface attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A queued ad was rendered.
    RenderedQueued(AdHandle),
    /// Nothing was queued; a fresh ad was fetched and rendered.
    RenderedFresh(AdHandle),
    /// The fresh ad arrived after the surface detached again and was queued.
    Enqueued(AdHandle),
    /// Nothing was queued and the fresh fetch failed.
    FetchFailed(BridgeError),
}

/// Reacts to a registered surface being attached to a window.
///
/// Attach events come from the host UI and are not tied to any adapter
/// instance, so the handler works from the surface's own zone.
pub struct SurfaceAttachHandler {
    context: Arc<BridgeContext>,
    negotiator: Arc<CapabilityNegotiator>,
    ui: Arc<dyn UiDispatcher>,
}

impl SurfaceAttachHandler {
    pub fn new(
        context: Arc<BridgeContext>,
        negotiator: Arc<CapabilityNegotiator>,
        ui: Arc<dyn UiDispatcher>,
    ) -> Self {
        Self {
            context,
            negotiator,
            ui,
        }
    }

    /// Renders the zone's oldest queued ad, or fetches a new one.
    pub async fn on_attached(&self, surface: Arc<dyn Surface>, size: AdSize) -> AttachOutcome {
        let zone = surface.zone().clone();
        tracing::debug!(zone = %zone, surface = %surface.id(), "Surface attached");

        if let Some(ad) = self.context.inventory().dequeue(&zone) {
            tracing::debug!(zone = %zone, ad = %ad, "Rendering queued ad");
            self.render(&surface, ad.clone());
            return AttachOutcome::RenderedQueued(ad);
        }

        match self.negotiator.fetch(&zone, size).await {
            Ok(ad) if surface.is_attached() => {
                self.render(&surface, ad.clone());
                AttachOutcome::RenderedFresh(ad)
            }
            Ok(ad) => {
                self.context.inventory().enqueue(&zone, ad.clone());
                AttachOutcome::Enqueued(ad)
            }
            Err(error) => {
                tracing::warn!(zone = %zone, error = %error, "Fetch on attach failed");
                AttachOutcome::FetchFailed(error)
            }
        }
    }

    fn render(&self, surface: &Arc<dyn Surface>, ad: AdHandle) {
        let surface = surface.clone();
        self.ui.dispatch(Box::new(move || surface.render(&ad)));
    }
}

impl std::fmt::Debug for SurfaceAttachHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceAttachHandler").finish_non_exhaustive()
    }
}
