//! Request module - Everything an adapter instance knows about one request.

mod extras;
mod format;
mod reward;
mod size;
mod status;
mod zone_policy;

pub use extras::{NetworkExtras, NetworkExtrasBuilder};
pub use format::{AdFormat, HostContext, HostKind};
pub use reward::RewardItem;
pub use size::{AdSize, RequestedSize};
pub use status::RequestStatus;
pub use zone_policy::{resolve_request_zone, ZoneFallback};
