//! Mediation Bridge - Adapts a third-party ad network SDK to a mediation layer.
//!
//! The bridge fetches ads through whichever call shapes the installed SDK
//! supports, parks fetched banners in a zone-scoped inventory cache until a
//! surface can render them, and relays every SDK event to the mediation
//! sink on the UI context.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
