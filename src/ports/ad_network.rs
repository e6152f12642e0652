//! AdNetwork port - The third-party ad SDK as the bridge sees it.
//!
//! The SDK exposes two generations of every call: a legacy shape that only
//! serves the default zone and a zone-aware shape added in later versions.
//! Both are modelled here side by side. Which one may be called is decided
//! by the capability negotiator, never by adapters directly.
//!
//! # Design
//!
//! - Fetches are async and fail with the SDK's raw error vocabulary
//! - Surface creation and presentation are synchronous SDK calls
//! - Calling a shape the installed SDK lacks is a programming error the
//!   implementation reports as `BridgeError::Internal`

use async_trait::async_trait;
use std::sync::Arc;

use super::{FullscreenListeners, Surface};
use crate::domain::capability::SdkDescriptor;
use crate::domain::foundation::{AdHandle, BridgeError, NetworkErrorCode, ZoneKey};
use crate::domain::request::{AdFormat, AdSize, HostContext};

/// Port for the ad network SDK.
#[async_trait]
pub trait AdNetwork: Send + Sync {
    /// Version information reported by the installed SDK.
    fn descriptor(&self) -> SdkDescriptor;

    /// Tells the SDK which mediation plugin is driving it.
    fn set_plugin_version(&self, version: &str);

    /// Legacy fetch. Always serves the default zone.
    async fn load_next_ad(&self, size: AdSize) -> Result<AdHandle, NetworkErrorCode>;

    /// Zone-aware fetch.
    async fn load_next_ad_for_zone(&self, zone: &ZoneKey) -> Result<AdHandle, NetworkErrorCode>;

    /// Legacy surface constructor. The surface belongs to the default zone.
    fn create_surface(&self, request: &SurfaceRequest) -> Result<Arc<dyn Surface>, BridgeError>;

    /// Zone-aware surface constructor.
    fn create_surface_for_zone(
        &self,
        request: &SurfaceRequest,
        zone: &ZoneKey,
    ) -> Result<Arc<dyn Surface>, BridgeError>;

    /// Legacy fullscreen presentation.
    fn show(&self, ad: &AdHandle, presentation: &Presentation) -> Result<(), BridgeError>;

    /// Zone-aware fullscreen presentation.
    fn show_for_zone(
        &self,
        ad: &AdHandle,
        zone: &ZoneKey,
        presentation: &Presentation,
    ) -> Result<(), BridgeError>;
}

/// Arguments for constructing a display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub format: AdFormat,
    pub size: AdSize,
    pub host: HostContext,
}

impl SurfaceRequest {
    pub fn new(format: AdFormat, size: AdSize, host: HostContext) -> Self {
        Self { format, size, host }
    }

    /// A fullscreen surface for interstitial or rewarded formats.
    pub fn fullscreen(format: AdFormat, host: HostContext) -> Self {
        Self::new(format, AdSize::Interstitial, host)
    }
}

/// Everything the SDK needs to put a fullscreen ad on screen.
#[derive(Clone, Debug)]
pub struct Presentation {
    pub host: HostContext,
    /// Pre-built fullscreen surface, when the format keeps one.
    pub surface: Option<Arc<dyn Surface>>,
    pub listeners: FullscreenListeners,
}
