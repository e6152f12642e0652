//! In-memory surface registry.
//!
//! The factory runs while the registry lock is held. That is what makes
//! construction single per zone, and it means a factory must never call
//! back into the same registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{BridgeError, ZoneKey};
use crate::ports::{Surface, SurfaceFactory, SurfaceRegistry};

/// Process-local surface registry keyed by zone.
#[derive(Default)]
pub struct InMemorySurfaceRegistry {
    surfaces: Mutex<HashMap<ZoneKey, Arc<dyn Surface>>>,
}

impl InMemorySurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ZoneKey, Arc<dyn Surface>>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for InMemorySurfaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySurfaceRegistry")
            .field("surfaces", &self.len())
            .finish()
    }
}

impl SurfaceRegistry for InMemorySurfaceRegistry {
    fn get_or_create(
        &self,
        zone: &ZoneKey,
        factory: SurfaceFactory<'_>,
    ) -> Result<Arc<dyn Surface>, BridgeError> {
        let mut surfaces = self.lock();
        if let Some(existing) = surfaces.get(zone) {
            return Ok(existing.clone());
        }

        let surface = factory()?;
        tracing::debug!(zone = %zone, surface = %surface.id(), "Surface created");
        surfaces.insert(zone.clone(), surface.clone());
        Ok(surface)
    }

    fn get(&self, zone: &ZoneKey) -> Option<Arc<dyn Surface>> {
        self.lock().get(zone).cloned()
    }

    fn clear_all(&self) -> usize {
        let mut surfaces = self.lock();
        let removed = surfaces.len();
        surfaces.clear();

        tracing::debug!(removed, "Surface registry cleared");
        removed
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
