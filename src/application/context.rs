//! BridgeContext - Process-wide state shared by every adapter instance.
//!
//! The mediation layer creates a fresh adapter for every request and every
//! refresh. Whatever must outlive those instances lives here: the inventory
//! cache, the surface registries and the fullscreen ads loaded but not yet
//! shown.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::{InMemoryInventoryCache, InMemorySurfaceRegistry};
use crate::domain::foundation::{AdHandle, ZoneKey};
use crate::ports::{InventoryCache, SurfaceRegistry};

static SHARED: Lazy<Arc<BridgeContext>> = Lazy::new(|| Arc::new(BridgeContext::in_memory()));

/// Owner of the bridge's shared stores.
pub struct BridgeContext {
    inventory: Arc<dyn InventoryCache>,
    banner_surfaces: Arc<dyn SurfaceRegistry>,
    fullscreen_surfaces: Arc<dyn SurfaceRegistry>,
    ready_fullscreen: Mutex<HashMap<ZoneKey, AdHandle>>,
}

impl BridgeContext {
    pub fn new(
        inventory: Arc<dyn InventoryCache>,
        banner_surfaces: Arc<dyn SurfaceRegistry>,
        fullscreen_surfaces: Arc<dyn SurfaceRegistry>,
    ) -> Self {
        Self {
            inventory,
            banner_surfaces,
            fullscreen_surfaces,
            ready_fullscreen: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a context with empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryInventoryCache::new()),
            Arc::new(InMemorySurfaceRegistry::new()),
            Arc::new(InMemorySurfaceRegistry::new()),
        )
    }

    /// The process-wide context, created empty on first use.
    pub fn shared() -> Arc<BridgeContext> {
        SHARED.clone()
    }

    pub fn inventory(&self) -> &Arc<dyn InventoryCache> {
        &self.inventory
    }

    /// Registry of banner surfaces.
    pub fn banner_surfaces(&self) -> &Arc<dyn SurfaceRegistry> {
        &self.banner_surfaces
    }

    /// Registry of fullscreen surfaces used by the rewarded format.
    pub fn fullscreen_surfaces(&self) -> &Arc<dyn SurfaceRegistry> {
        &self.fullscreen_surfaces
    }

    /// The fullscreen ad loaded for `zone` and not yet shown, if any.
    pub fn ready_fullscreen(&self, zone: &ZoneKey) -> Option<AdHandle> {
        self.ready_slots().get(zone).cloned()
    }

    /// Parks a freshly loaded fullscreen ad until a `show` consumes it.
    pub fn park_fullscreen(&self, zone: &ZoneKey, ad: AdHandle) {
        if let Some(replaced) = self.ready_slots().insert(zone.clone(), ad) {
            tracing::warn!(zone = %zone, ad = %replaced, "Replaced an unshown fullscreen ad");
        }
    }

    /// Removes `ad` from the zone's slot. Returns false if another instance
    /// already consumed it.
    pub fn take_fullscreen(&self, zone: &ZoneKey, ad: &AdHandle) -> bool {
        let mut slots = self.ready_slots();
        if slots.get(zone) == Some(ad) {
            slots.remove(zone);
            true
        } else {
            false
        }
    }

    /// Teardown hook for the hosting screen.
    ///
    /// Surfaces are tied to the screen that created them, so every registry
    /// is cleared along with the fullscreen ads loaded into them. Queued
    /// banner ads are not tied to a screen and stay available to the next
    /// surface for their zone.
    pub fn on_host_destroyed(&self) -> usize {
        self.ready_slots().clear();
        let removed = self.banner_surfaces.clear_all() + self.fullscreen_surfaces.clear_all();
        tracing::info!(removed, queued_ads_kept = true, "Host destroyed, surfaces released");
        removed
    }

    /// Teardown hook for the whole process: releases surfaces and drops
    /// queued inventory.
    pub fn shutdown(&self) {
        self.ready_slots().clear();
        let surfaces = self.banner_surfaces.clear_all() + self.fullscreen_surfaces.clear_all();
        let ads = self.inventory.drain_all();
        tracing::info!(surfaces, ads, "Bridge context shut down");
    }

    fn ready_slots(&self) -> std::sync::MutexGuard<'_, HashMap<ZoneKey, AdHandle>> {
        self.ready_fullscreen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeContext")
            .field("banner_surfaces", &self.banner_surfaces.len())
            .field("fullscreen_surfaces", &self.fullscreen_surfaces.len())
            .finish_non_exhaustive()
    }
}
