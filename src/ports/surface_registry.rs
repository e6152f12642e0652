//! SurfaceRegistry port - One reusable surface per zone.
//!
//! Surfaces are expensive and stateful. Recreating one on every mediation
//! refresh tears down in-flight requests and suppresses fill, so they are
//! kept here for as long as the hosting screen lives.

use std::sync::Arc;

use super::Surface;
use crate::domain::foundation::{BridgeError, ZoneKey};

/// Builds a surface for a zone not yet in the registry.
pub type SurfaceFactory<'a> = Box<dyn FnOnce() -> Result<Arc<dyn Surface>, BridgeError> + Send + 'a>;

/// Port for the process-wide surface registry.
///
/// Implementations must guarantee single construction: concurrent
/// `get_or_create` calls for the same unseen zone store exactly one surface
/// and all of them return it.
pub trait SurfaceRegistry: Send + Sync {
    /// Returns the zone's surface, constructing it with `factory` if absent.
    ///
    /// A failing factory stores nothing and its error is returned.
    fn get_or_create(
        &self,
        zone: &ZoneKey,
        factory: SurfaceFactory<'_>,
    ) -> Result<Arc<dyn Surface>, BridgeError>;

    /// Returns the zone's surface without creating one.
    fn get(&self, zone: &ZoneKey) -> Option<Arc<dyn Surface>>;

    /// Removes every zone's surface, returning how many were removed.
    ///
    /// Surfaces already handed out remain usable by their holders but are
    /// no longer reachable through the registry.
    fn clear_all(&self) -> usize;

    /// Number of registered surfaces.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
