//! Capability module - What the installed ad network SDK can do.
//!
//! The SDK version is resolved once into a [`CapabilityLevel`]; the dispatch
//! table then maps each zone-scoped [`Operation`] to a [`CallShape`].

mod dispatch;
mod level;

pub use dispatch::{has_zone_overload, resolve, CallShape, Operation};
pub use level::{CapabilityLevel, SdkDescriptor};
