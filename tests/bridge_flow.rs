//! Integration tests for the banner request / surface attach flow.
//!
//! These tests drive adapter instances end to end the way the mediation
//! layer does: a fresh adapter per request, a shared `BridgeContext`, and
//! callbacks delivered through a channel-backed UI loop.
//!
//! Uses the scriptable mock network so no SDK is required.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mediation_bridge::adapters::{ChannelDispatcher, MockAdNetwork, MockFetch, UiLoop};
use mediation_bridge::application::{
    AttachOutcome, BannerAdapter, BannerRequest, BridgeContext, CapabilityNegotiator,
    InterstitialAdapter, InterstitialRequest, SurfaceAttachHandler,
};
use mediation_bridge::config::BridgeConfig;
use mediation_bridge::domain::foundation::{AdHandle, MediationErrorCode, ZoneKey};
use mediation_bridge::domain::request::{AdSize, HostContext, RequestStatus, RequestedSize, ZoneFallback};
use mediation_bridge::ports::{
    ClickCallbacks, DisplayCallbacks, LoadCallbacks, LoadedAd, MediationSink, Surface,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Loaded,
    Failed(MediationErrorCode),
    Opened,
    Closed,
    Clicked,
    LeftApplication,
}

/// Mediation sink that records what reached it.
#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<Event>>,
    surfaces: Mutex<Vec<Arc<dyn Surface>>>,
}

impl EventLog {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl LoadCallbacks for EventLog {
    fn on_loaded(&self, ad: LoadedAd) {
        if let LoadedAd::Surface(surface) = ad {
            self.surfaces.lock().unwrap().push(surface);
        }
        self.push(Event::Loaded);
    }

    fn on_failed_to_load(&self, code: MediationErrorCode) {
        self.push(Event::Failed(code));
    }
}

impl DisplayCallbacks for EventLog {
    fn on_opened(&self) {
        self.push(Event::Opened);
    }

    fn on_closed(&self) {
        self.push(Event::Closed);
    }
}

impl ClickCallbacks for EventLog {
    fn on_clicked(&self) {
        self.push(Event::Clicked);
    }

    fn on_left_application(&self) {
        self.push(Event::LeftApplication);
    }
}

struct Bridge {
    network: MockAdNetwork,
    context: Arc<BridgeContext>,
    negotiator: Arc<CapabilityNegotiator>,
    dispatcher: ChannelDispatcher,
    ui_loop: UiLoop,
    fallback: ZoneFallback,
}

impl Bridge {
    fn new(network: MockAdNetwork) -> Self {
        Self::with_config(network, BridgeConfig::default())
    }

    fn with_config(network: MockAdNetwork, config: BridgeConfig) -> Self {
        let negotiator = Arc::new(CapabilityNegotiator::new(Arc::new(network.clone()), &config.sdk));
        let (dispatcher, ui_loop) = ChannelDispatcher::new();
        Self {
            network,
            context: Arc::new(BridgeContext::in_memory()),
            negotiator,
            dispatcher,
            ui_loop,
            fallback: config.zones.fallback,
        }
    }

    fn banner_adapter(&self) -> BannerAdapter {
        BannerAdapter::new(
            self.context.clone(),
            self.negotiator.clone(),
            Arc::new(self.dispatcher.clone()),
            self.fallback,
        )
    }

    fn attach_handler(&self) -> SurfaceAttachHandler {
        SurfaceAttachHandler::new(
            self.context.clone(),
            self.negotiator.clone(),
            Arc::new(self.dispatcher.clone()),
        )
    }

    fn run_ui(&mut self) -> usize {
        self.ui_loop.drain_pending()
    }
}

fn banner(zone: &str) -> BannerRequest {
    BannerRequest::new(HostContext::activity("Main"), RequestedSize::Banner).with_zone(zone)
}

// =============================================================================
// Request / attach flow
// =============================================================================

#[tokio::test]
async fn fill_while_detached_is_rendered_on_attach() {
    let mut bridge = Bridge::new(
        MockAdNetwork::new()
            .with_detached_surfaces()
            .with_fetch(MockFetch::FillWith(AdHandle::from(11))),
    );
    let log = Arc::new(EventLog::default());

    let status = bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(log.clone()))
        .await;
    assert_eq!(status, RequestStatus::Enqueued);
    assert!(bridge.context.inventory().has_ready(&ZoneKey::new("home")));

    let mock_surface = bridge.network.surfaces()[0].clone();
    mock_surface.attach();
    let surface: Arc<dyn Surface> = mock_surface.clone();
    let outcome = bridge.attach_handler().on_attached(surface, AdSize::Banner).await;

    assert_eq!(outcome, AttachOutcome::RenderedQueued(AdHandle::from(11)));
    assert!(mock_surface.rendered().is_empty());

    bridge.run_ui();
    assert_eq!(mock_surface.rendered(), vec![AdHandle::from(11)]);
    assert_eq!(log.events(), vec![Event::Loaded]);
    assert_eq!(log.surfaces.lock().unwrap()[0].id(), mock_surface.id());
    assert!(!bridge.context.inventory().has_ready(&ZoneKey::new("home")));
}

#[tokio::test]
async fn callbacks_only_run_on_the_ui_loop() {
    let mut bridge = Bridge::new(MockAdNetwork::new().with_no_fill());
    let log = Arc::new(EventLog::default());

    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(log.clone()))
        .await;
    assert!(log.events().is_empty());

    assert_eq!(bridge.run_ui(), 1);
    assert_eq!(log.events(), vec![Event::Failed(MediationErrorCode::NoFill)]);
}

#[tokio::test]
async fn queued_ads_are_served_oldest_first_then_no_fill() {
    let mut bridge = Bridge::new(MockAdNetwork::new().with_no_fill());
    let zone = ZoneKey::new("home");
    bridge.context.inventory().enqueue(&zone, AdHandle::from(1));
    bridge.context.inventory().enqueue(&zone, AdHandle::from(2));

    let first = Arc::new(EventLog::default());
    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(first.clone()))
        .await;
    bridge.run_ui();
    assert_eq!(first.events(), vec![Event::Loaded]);
    assert_eq!(bridge.network.surfaces()[0].rendered(), vec![AdHandle::from(1)]);

    let second = Arc::new(EventLog::default());
    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(second.clone()))
        .await;
    bridge.run_ui();
    assert_eq!(second.events(), vec![Event::Loaded]);
    assert_eq!(
        bridge.network.surfaces()[0].rendered(),
        vec![AdHandle::from(1), AdHandle::from(2)]
    );

    let third = Arc::new(EventLog::default());
    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(third.clone()))
        .await;
    bridge.run_ui();
    assert_eq!(third.events(), vec![Event::Failed(MediationErrorCode::NoFill)]);
    assert_eq!(bridge.network.fetch_count(), 1);
}

#[tokio::test]
async fn concurrent_requests_share_one_surface_per_zone() {
    let mut bridge = Bridge::new(MockAdNetwork::new().with_delay(Duration::from_millis(10)));
    let logs: Vec<Arc<EventLog>> = (0..4).map(|_| Arc::new(EventLog::default())).collect();
    let (mut a, mut b, mut c, mut d) = (
        bridge.banner_adapter(),
        bridge.banner_adapter(),
        bridge.banner_adapter(),
        bridge.banner_adapter(),
    );
    let statuses = tokio::join!(
        a.request_ad(banner("feed"), MediationSink::from_listener(logs[0].clone())),
        b.request_ad(banner("feed"), MediationSink::from_listener(logs[1].clone())),
        c.request_ad(banner("feed"), MediationSink::from_listener(logs[2].clone())),
        d.request_ad(banner("other"), MediationSink::from_listener(logs[3].clone())),
    );
    bridge.run_ui();

    assert_eq!(statuses.0, RequestStatus::Rendering);
    assert_eq!(statuses.3, RequestStatus::Rendering);
    assert_eq!(bridge.network.surfaces().len(), 2);
    assert_eq!(bridge.context.banner_surfaces().len(), 2);

    let feed = bridge.context.banner_surfaces().get(&ZoneKey::new("feed")).unwrap();
    let other = bridge.context.banner_surfaces().get(&ZoneKey::new("other")).unwrap();
    assert_ne!(feed.id(), other.id());
    for log in &logs {
        assert_eq!(log.events(), vec![Event::Loaded]);
    }
}

#[tokio::test]
async fn host_teardown_keeps_queued_ads_for_the_next_surface() {
    let mut bridge = Bridge::new(
        MockAdNetwork::new()
            .with_detached_surfaces()
            .with_fetch(MockFetch::FillWith(AdHandle::from(5))),
    );
    let log = Arc::new(EventLog::default());
    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(log.clone()))
        .await;
    let old = bridge
        .context
        .banner_surfaces()
        .get(&ZoneKey::new("home"))
        .unwrap();

    assert_eq!(bridge.context.on_host_destroyed(), 1);

    let adapter_log = Arc::new(EventLog::default());
    let mut adapter = bridge.banner_adapter();
    adapter
        .request_ad(banner("home"), MediationSink::from_listener(adapter_log.clone()))
        .await;
    bridge.run_ui();

    let fresh = adapter.surface().unwrap().clone();
    assert_ne!(fresh.id(), old.id());
    assert_eq!(bridge.network.surfaces().len(), 2);
    assert_eq!(adapter_log.events(), vec![Event::Loaded]);
    assert!(bridge.context.inventory().has_ready(&ZoneKey::new("home")));
}

#[tokio::test]
async fn banner_click_reports_click_open_and_leave() {
    let mut bridge = Bridge::new(MockAdNetwork::new());
    let log = Arc::new(EventLog::default());
    bridge
        .banner_adapter()
        .request_ad(banner("home"), MediationSink::from_listener(log.clone()))
        .await;

    bridge.run_ui();

    assert!(bridge.network.surfaces()[0].simulate_click());
    bridge.run_ui();

    assert_eq!(
        log.events(),
        vec![Event::Loaded, Event::Clicked, Event::Opened, Event::LeftApplication]
    );
}

// =============================================================================
// Capability downgrade
// =============================================================================

#[tokio::test]
async fn named_zone_on_zone_unaware_sdk_folds_into_default() {
    let mut bridge = Bridge::new(MockAdNetwork::new().with_version_code(730));
    let log = Arc::new(EventLog::default());
    let mut adapter = bridge.banner_adapter();

    let status = adapter
        .request_ad(banner("rewarded1"), MediationSink::from_listener(log.clone()))
        .await;
    bridge.run_ui();

    assert_eq!(status, RequestStatus::Rendering);
    assert!(adapter.zone().unwrap().is_default());
    assert!(bridge.network.calls().iter().all(|call| !call.is_zone_aware()));
    assert!(bridge.context.banner_surfaces().get(&ZoneKey::new("rewarded1")).is_none());
}

#[tokio::test]
async fn strict_policy_rejects_named_zone_on_zone_unaware_sdk() {
    let mut config = BridgeConfig::default();
    config.zones.fallback = ZoneFallback::Reject;
    let mut bridge = Bridge::with_config(MockAdNetwork::new().with_version_code(730), config);
    let log = Arc::new(EventLog::default());

    let status = bridge
        .banner_adapter()
        .request_ad(banner("rewarded1"), MediationSink::from_listener(log.clone()))
        .await;
    bridge.run_ui();

    assert_eq!(status, RequestStatus::Failed);
    assert_eq!(log.events(), vec![Event::Failed(MediationErrorCode::InvalidRequest)]);
    assert_eq!(bridge.network.fetch_count(), 0);
}

// =============================================================================
// Fullscreen
// =============================================================================

#[tokio::test]
async fn interstitial_lifecycle_through_ui_loop() {
    let mut bridge = Bridge::new(MockAdNetwork::new());
    let log = Arc::new(EventLog::default());
    let mut adapter = InterstitialAdapter::new(
        bridge.negotiator.clone(),
        Arc::new(bridge.dispatcher.clone()),
        bridge.fallback,
    );

    adapter
        .request_ad(
            InterstitialRequest::new(HostContext::activity("Main")),
            MediationSink::from_listener(log.clone()),
        )
        .await;
    adapter.show().unwrap();
    bridge.network.play_last_presentation(true, None);
    bridge.run_ui();

    assert_eq!(log.events(), vec![Event::Loaded, Event::Opened, Event::Closed]);
    assert!(!bridge.context.inventory().has_ready(&ZoneKey::default_zone()));
}
