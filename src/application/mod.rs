//! Application layer - Adapter instances and the shared bridge context.
//!
//! The mediation layer drives one adapter instance per request. Adapters
//! coordinate the ports: they negotiate call shapes with the ad network,
//! consult the inventory cache and surface registries held by the
//! `BridgeContext`, and report back through a `SinkRelay`.

mod banner;
mod context;
mod interstitial;
mod negotiator;
pub(crate) mod relay;
mod rewarded;

pub use banner::{AttachOutcome, BannerAdapter, BannerRequest, SurfaceAttachHandler};
pub use context::BridgeContext;
pub use interstitial::{InterstitialAdapter, InterstitialRequest};
pub use negotiator::CapabilityNegotiator;
pub use relay::SinkRelay;
pub use rewarded::{RewardedAdapter, RewardedRequest};
