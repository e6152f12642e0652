//! InventoryCache port - Zone-scoped queues of fetched but undisplayed ads.
//!
//! Adapter instances are recreated on every mediation refresh. An ad that
//! arrives while its surface is detached must outlive the instance that
//! fetched it, so it is parked here until the next attach or request for
//! the same zone.

use crate::domain::foundation::{AdHandle, ZoneKey};

/// Port for the process-wide ad inventory.
///
/// Implementations must:
/// - Keep one FIFO queue per zone, created lazily on first enqueue
/// - Never hand the same ad to two concurrent `dequeue` calls
/// - Never lose an ad enqueued concurrently with a `dequeue`
pub trait InventoryCache: Send + Sync {
    /// Appends `ad` to the zone's queue.
    fn enqueue(&self, zone: &ZoneKey, ad: AdHandle);

    /// Removes and returns the oldest ad for `zone`.
    fn dequeue(&self, zone: &ZoneKey) -> Option<AdHandle>;

    /// Returns true if a `dequeue` would succeed right now.
    ///
    /// Only a hint: a concurrent `dequeue` may take the ad first. Callers
    /// that need the ad must go through `dequeue`.
    fn has_ready(&self, zone: &ZoneKey) -> bool;

    /// Number of ads queued for `zone`.
    fn queued(&self, zone: &ZoneKey) -> usize;

    /// Removes every queued ad in every zone, returning how many were dropped.
    ///
    /// Only for process teardown; during normal operation queues are drained
    /// through `dequeue`.
    fn drain_all(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn InventoryCache) {}
}
