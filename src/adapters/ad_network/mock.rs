//! Mock ad network for testing.
//!
//! Provides a scriptable implementation of the AdNetwork port so the bridge
//! can be exercised without the real SDK.
//!
//! # Features
//!
//! - Pre-configured fetch outcomes (consumed in order, fill by default)
//! - Configurable SDK version to exercise every capability level
//! - Fetches that never complete, for in-flight scenarios
//! - Call tracking for verification
//! - Surfaces whose attachment and listener events tests can drive
//!
//! # Example
//!
//! ```ignore
//! let network = MockAdNetwork::new()
//!     .with_version_code(740)
//!     .with_no_fill();
//!
//! let result = network.load_next_ad(AdSize::Banner).await;
//! assert_eq!(result, Err(NetworkErrorCode::NoFill));
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::capability::{CapabilityLevel, SdkDescriptor};
use crate::domain::foundation::{AdHandle, BridgeError, NetworkErrorCode, SurfaceId, ZoneKey};
use crate::domain::request::{AdFormat, AdSize, HostKind};
use crate::ports::{
    AdClickListener, AdDisplayListener, AdNetwork, Presentation, Surface, SurfaceRequest,
};

/// Mock ad network for testing.
#[derive(Clone)]
pub struct MockAdNetwork {
    /// Scripted fetch outcomes (consumed in order).
    fetches: Arc<Mutex<VecDeque<MockFetch>>>,
    /// Reported SDK version.
    version_code: u32,
    /// Simulated latency per fetch.
    delay: Duration,
    /// Whether surfaces start out attached to a window.
    attach_new_surfaces: bool,
    /// Next ad id handed out on fill.
    next_ad: Arc<AtomicU64>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<NetworkCall>>>,
    surfaces: Arc<Mutex<Vec<Arc<MockSurface>>>>,
    presentations: Arc<Mutex<Vec<(AdHandle, Presentation)>>>,
}

/// A scripted fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFetch {
    /// Fill with the next generated ad.
    Fill,
    /// Fill with a specific ad.
    FillWith(AdHandle),
    /// Fail with the given network code.
    Fail(NetworkErrorCode),
    /// Never complete.
    Pending,
}

/// A recorded call into the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkCall {
    SetPluginVersion(String),
    LoadNextAd(AdSize),
    LoadNextAdForZone(ZoneKey),
    CreateSurface {
        format: AdFormat,
        size: AdSize,
        host: HostKind,
    },
    CreateSurfaceForZone {
        format: AdFormat,
        size: AdSize,
        host: HostKind,
        zone: ZoneKey,
    },
    Show(AdHandle),
    ShowForZone(AdHandle, ZoneKey),
}

impl NetworkCall {
    /// Returns true for calls that use the zone-aware shape.
    pub fn is_zone_aware(&self) -> bool {
        matches!(
            self,
            NetworkCall::LoadNextAdForZone(_)
                | NetworkCall::CreateSurfaceForZone { .. }
                | NetworkCall::ShowForZone(..)
        )
    }

    /// Returns true for fetch calls of either shape.
    pub fn is_fetch(&self) -> bool {
        matches!(self, NetworkCall::LoadNextAd(_) | NetworkCall::LoadNextAdForZone(_))
    }
}

impl Default for MockAdNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdNetwork {
    /// Creates a zone-aware mock network that fills every request.
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(Mutex::new(VecDeque::new())),
            version_code: CapabilityLevel::ZONE_AWARE_SINCE,
            delay: Duration::ZERO,
            attach_new_surfaces: true,
            next_ad: Arc::new(AtomicU64::new(1)),
            calls: Arc::new(Mutex::new(Vec::new())),
            surfaces: Arc::new(Mutex::new(Vec::new())),
            presentations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the SDK version the network reports.
    pub fn with_version_code(mut self, version_code: u32) -> Self {
        self.version_code = version_code;
        self
    }

    /// Sets simulated latency per fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// New surfaces start detached until a test attaches them.
    pub fn with_detached_surfaces(mut self) -> Self {
        self.attach_new_surfaces = false;
        self
    }

    /// Adds a scripted outcome to the queue.
    pub fn with_fetch(self, fetch: MockFetch) -> Self {
        self.push_fetch(fetch);
        self
    }

    pub fn with_fill(self) -> Self {
        self.with_fetch(MockFetch::Fill)
    }

    pub fn with_no_fill(self) -> Self {
        self.with_fetch(MockFetch::Fail(NetworkErrorCode::NoFill))
    }

    pub fn with_error(self, code: NetworkErrorCode) -> Self {
        self.with_fetch(MockFetch::Fail(code))
    }

    pub fn with_pending_fetch(self) -> Self {
        self.with_fetch(MockFetch::Pending)
    }

    /// Adds a scripted outcome to an already shared network.
    pub fn push_fetch(&self, fetch: MockFetch) {
        self.fetches.lock().unwrap().push_back(fetch);
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<NetworkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of fetches issued in either shape.
    pub fn fetch_count(&self) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.is_fetch()).count()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Surfaces created so far, oldest first.
    pub fn surfaces(&self) -> Vec<Arc<MockSurface>> {
        self.surfaces.lock().unwrap().clone()
    }

    /// The most recent fullscreen presentation.
    pub fn last_presentation(&self) -> Option<(AdHandle, Presentation)> {
        self.presentations.lock().unwrap().last().cloned()
    }

    /// Plays a fullscreen session through the listeners of the last `show`.
    ///
    /// Reports display, playback and, when `reward` is given, a verified
    /// reward before hiding the ad. Returns false if nothing was shown.
    pub fn play_last_presentation(
        &self,
        fully_watched: bool,
        reward: Option<HashMap<String, String>>,
    ) -> bool {
        let Some((ad, presentation)) = self.last_presentation() else {
            return false;
        };
        let listeners = &presentation.listeners;

        listeners.display.ad_displayed(&ad);
        if let Some(playback) = &listeners.playback {
            playback.playback_began(&ad);
        }
        if let (Some(reward_listener), Some(response)) = (&listeners.reward, reward.as_ref()) {
            reward_listener.reward_verified(&ad, response);
        }
        if let Some(playback) = &listeners.playback {
            let percent = if fully_watched { 100.0 } else { 40.0 };
            playback.playback_ended(&ad, percent, fully_watched);
        }
        listeners.display.ad_hidden(&ad);
        true
    }

    fn record(&self, call: NetworkCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn level(&self) -> CapabilityLevel {
        CapabilityLevel::from_version_code(self.version_code)
    }

    fn require_zones(&self, call: &str) -> Result<(), BridgeError> {
        if self.level().supports_zones() {
            Ok(())
        } else {
            Err(BridgeError::internal(format!(
                "{} is not available in SDK {}",
                call, self.version_code
            )))
        }
    }

    async fn next_fetch(&self) -> Result<AdHandle, NetworkErrorCode> {
        let fetch = self
            .fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockFetch::Fill);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match fetch {
            MockFetch::Fill => Ok(AdHandle::from(self.next_ad.fetch_add(1, Ordering::SeqCst))),
            MockFetch::FillWith(ad) => Ok(ad),
            MockFetch::Fail(code) => Err(code),
            MockFetch::Pending => std::future::pending().await,
        }
    }

    fn build_surface(&self, request: &SurfaceRequest, zone: ZoneKey) -> Arc<dyn Surface> {
        let surface = Arc::new(MockSurface::new(zone, request.size));
        if self.attach_new_surfaces {
            surface.attach();
        }
        self.surfaces.lock().unwrap().push(surface.clone());
        surface
    }
}

#[async_trait]
impl AdNetwork for MockAdNetwork {
    fn descriptor(&self) -> SdkDescriptor {
        SdkDescriptor::new(self.version_code)
    }

    fn set_plugin_version(&self, version: &str) {
        self.record(NetworkCall::SetPluginVersion(version.to_string()));
    }

    async fn load_next_ad(&self, size: AdSize) -> Result<AdHandle, NetworkErrorCode> {
        self.record(NetworkCall::LoadNextAd(size));
        self.next_fetch().await
    }

    async fn load_next_ad_for_zone(&self, zone: &ZoneKey) -> Result<AdHandle, NetworkErrorCode> {
        self.record(NetworkCall::LoadNextAdForZone(zone.clone()));
        if !self.level().supports_zones() {
            return Err(NetworkErrorCode::Unspecified);
        }
        self.next_fetch().await
    }

    fn create_surface(&self, request: &SurfaceRequest) -> Result<Arc<dyn Surface>, BridgeError> {
        self.record(NetworkCall::CreateSurface {
            format: request.format,
            size: request.size,
            host: request.host.kind(),
        });
        Ok(self.build_surface(request, ZoneKey::default_zone()))
    }

    fn create_surface_for_zone(
        &self,
        request: &SurfaceRequest,
        zone: &ZoneKey,
    ) -> Result<Arc<dyn Surface>, BridgeError> {
        self.record(NetworkCall::CreateSurfaceForZone {
            format: request.format,
            size: request.size,
            host: request.host.kind(),
            zone: zone.clone(),
        });
        self.require_zones("zone-aware surface constructor")?;
        Ok(self.build_surface(request, zone.clone()))
    }

    fn show(&self, ad: &AdHandle, presentation: &Presentation) -> Result<(), BridgeError> {
        self.record(NetworkCall::Show(ad.clone()));
        self.presentations
            .lock()
            .unwrap()
            .push((ad.clone(), presentation.clone()));
        Ok(())
    }

    fn show_for_zone(
        &self,
        ad: &AdHandle,
        zone: &ZoneKey,
        presentation: &Presentation,
    ) -> Result<(), BridgeError> {
        self.record(NetworkCall::ShowForZone(ad.clone(), zone.clone()));
        self.require_zones("zone-aware show")?;
        self.presentations
            .lock()
            .unwrap()
            .push((ad.clone(), presentation.clone()));
        Ok(())
    }
}

type SurfaceListeners = (Arc<dyn AdDisplayListener>, Arc<dyn AdClickListener>);

/// Surface whose window attachment is driven by the test.
pub struct MockSurface {
    id: SurfaceId,
    zone: ZoneKey,
    size: AdSize,
    attached: AtomicBool,
    paused: AtomicBool,
    pause_count: AtomicUsize,
    rendered: Mutex<Vec<AdHandle>>,
    listeners: Mutex<Option<SurfaceListeners>>,
}

impl MockSurface {
    /// Creates a detached surface.
    pub fn new(zone: ZoneKey, size: AdSize) -> Self {
        Self {
            id: SurfaceId::new(),
            zone,
            size,
            attached: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            pause_count: AtomicUsize::new(0),
            rendered: Mutex::new(Vec::new()),
            listeners: Mutex::new(None),
        }
    }

    pub fn size(&self) -> AdSize {
        self.size
    }

    pub fn attach(&self) {
        self.attached.store(true, Ordering::SeqCst);
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    /// Ads rendered into this surface, oldest first.
    pub fn rendered(&self) -> Vec<AdHandle> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn pause_count(&self) -> usize {
        self.pause_count.load(Ordering::SeqCst)
    }

    pub fn has_listeners(&self) -> bool {
        self.listeners.lock().unwrap().is_some()
    }

    /// Reports a click on the most recently rendered ad.
    pub fn simulate_click(&self) -> bool {
        let Some(ad) = self.rendered.lock().unwrap().last().cloned() else {
            return false;
        };
        let Some((_, click)) = self.listeners.lock().unwrap().clone() else {
            return false;
        };
        click.ad_clicked(&ad);
        true
    }

    /// Reports display then hide of the most recently rendered ad.
    pub fn simulate_display_cycle(&self) -> bool {
        let Some(ad) = self.rendered.lock().unwrap().last().cloned() else {
            return false;
        };
        let Some((display, _)) = self.listeners.lock().unwrap().clone() else {
            return false;
        };
        display.ad_displayed(&ad);
        display.ad_hidden(&ad);
        true
    }
}

impl Surface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn zone(&self) -> &ZoneKey {
        &self.zone
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn render(&self, ad: &AdHandle) {
        self.rendered.lock().unwrap().push(ad.clone());
    }

    fn set_listeners(&self, display: Arc<dyn AdDisplayListener>, click: Arc<dyn AdClickListener>) {
        *self.listeners.lock().unwrap() = Some((display, click));
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        self.pause_count.fetch_add(1, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }
}
