//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the bridge core and the outside world. Adapters implement these ports.
//!
//! ## Ad Network Ports
//!
//! - `AdNetwork` - Fetch, surface construction and presentation, in both call shapes
//! - `Surface` - Reusable display object owned by the SDK
//! - `AdDisplayListener`, `AdClickListener`, `VideoPlaybackListener`,
//!   `RewardListener` - Events the SDK reports back
//!
//! ## Shared State Ports
//!
//! - `InventoryCache` - Zone-scoped FIFO of undisplayed ads
//! - `SurfaceRegistry` - One reusable surface per zone
//!
//! ## Host Ports
//!
//! - `MediationSink` - Callback roles of the mediation layer
//! - `UiDispatcher` - Scheduling onto the UI context

mod ad_network;
mod inventory_cache;
mod mediation_sink;
mod network_listeners;
mod surface;
mod surface_registry;
mod ui_dispatcher;

pub use ad_network::{AdNetwork, Presentation, SurfaceRequest};
pub use inventory_cache::InventoryCache;
pub use mediation_sink::{
    ClickCallbacks, DisplayCallbacks, LoadCallbacks, LoadedAd, MediationSink, RewardCallbacks,
};
pub use network_listeners::{
    AdClickListener, AdDisplayListener, FullscreenListeners, RewardListener, VideoPlaybackListener,
};
pub use surface::Surface;
pub use surface_registry::{SurfaceFactory, SurfaceRegistry};
pub use ui_dispatcher::{UiDispatcher, UiTask};
