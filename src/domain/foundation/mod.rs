//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the bridge.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{
    BridgeError, ConfigurationError, InvalidTransition, MediationErrorCode, NetworkErrorCode,
};
pub use ids::{AdHandle, AdId, SurfaceId, ZoneKey};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
