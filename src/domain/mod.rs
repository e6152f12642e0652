//! Domain layer containing the bridge's value types and pure rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (zone keys, ad handles, errors, state machine)
//! - `capability` - SDK capability levels and the call-shape dispatch table
//! - `request` - Formats, sizes, extras, request status and zone fallback policy

pub mod capability;
pub mod foundation;
pub mod request;
