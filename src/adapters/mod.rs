//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the bridge core to its hosts:
//! - `inventory` - Zone-scoped ad queues
//! - `surfaces` - Per-zone surface registry
//! - `dispatch` - Inline and channel-backed UI dispatchers
//! - `ad_network` - Scriptable ad network for tests and local development

pub mod ad_network;
pub mod dispatch;
pub mod inventory;
pub mod surfaces;

pub use ad_network::{MockAdNetwork, MockFetch, MockSurface, NetworkCall};
pub use dispatch::{ChannelDispatcher, InlineDispatcher, UiLoop};
pub use inventory::InMemoryInventoryCache;
pub use surfaces::InMemorySurfaceRegistry;
