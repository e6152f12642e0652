//! In-memory inventory cache.
//!
//! All zones share one mutex, so a dequeue can never observe a half-applied
//! enqueue and two dequeues can never pop the same ad.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{AdHandle, Timestamp, ZoneKey};
use crate::ports::InventoryCache;

/// A fetched ad waiting for a surface.
#[derive(Debug, Clone)]
struct QueuedAd {
    ad: AdHandle,
    queued_at: Timestamp,
}

/// Process-local inventory cache keyed by zone.
#[derive(Debug, Default)]
pub struct InMemoryInventoryCache {
    queues: Mutex<HashMap<ZoneKey, VecDeque<QueuedAd>>>,
}

impl InMemoryInventoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zones that have ever received an ad, in no particular order.
    pub fn zones(&self) -> Vec<ZoneKey> {
        self.lock().keys().cloned().collect()
    }

    /// Total number of queued ads across all zones.
    pub fn total_queued(&self) -> usize {
        self.lock().values().map(VecDeque::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ZoneKey, VecDeque<QueuedAd>>> {
        // Queue state stays consistent even if a holder panicked.
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryCache for InMemoryInventoryCache {
    fn enqueue(&self, zone: &ZoneKey, ad: AdHandle) {
        let mut queues = self.lock();
        let queue = queues.entry(zone.clone()).or_default();
        queue.push_back(QueuedAd {
            ad: ad.clone(),
            queued_at: Timestamp::now(),
        });

        tracing::debug!(zone = %zone, ad = %ad, queued = queue.len(), "Ad queued for later display");
    }

    fn dequeue(&self, zone: &ZoneKey) -> Option<AdHandle> {
        let mut queues = self.lock();
        let queued = queues.get_mut(zone)?.pop_front()?;

        tracing::debug!(
            zone = %zone,
            ad = %queued.ad,
            waited_ms = queued.queued_at.elapsed_ms(),
            "Ad taken from inventory"
        );
        Some(queued.ad)
    }

    fn has_ready(&self, zone: &ZoneKey) -> bool {
        self.lock().get(zone).is_some_and(|queue| !queue.is_empty())
    }

    fn queued(&self, zone: &ZoneKey) -> usize {
        self.lock().get(zone).map_or(0, VecDeque::len)
    }

    fn drain_all(&self) -> usize {
        let mut queues = self.lock();
        let dropped: usize = queues.values().map(VecDeque::len).sum();
        for queue in queues.values_mut() {
            queue.clear();
        }

        if dropped > 0 {
            tracing::info!(dropped, "Inventory drained");
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn zone(name: &str) -> ZoneKey {
        ZoneKey::new(name)
    }

    #[test]
    fn dequeue_on_unknown_zone_is_empty() {
        let cache = InMemoryInventoryCache::new();
        assert_eq!(cache.dequeue(&zone("never-seen")), None);
        assert!(!cache.has_ready(&zone("never-seen")));
    }

    #[test]
    fn ads_come_back_in_arrival_order() {
        let cache = InMemoryInventoryCache::new();
        let a = zone("A");

        cache.enqueue(&a, AdHandle::from(1));
        cache.enqueue(&a, AdHandle::from(2));

        assert_eq!(cache.dequeue(&a), Some(AdHandle::from(1)));
        assert_eq!(cache.dequeue(&a), Some(AdHandle::from(2)));
        assert_eq!(cache.dequeue(&a), None);
    }

    #[test]
    fn zones_do_not_share_queues() {
        let cache = InMemoryInventoryCache::new();
        cache.enqueue(&zone("A"), AdHandle::from(1));

        assert!(cache.has_ready(&zone("A")));
        assert!(!cache.has_ready(&zone("B")));
        assert!(!cache.has_ready(&ZoneKey::default_zone()));
        assert_eq!(cache.dequeue(&zone("B")), None);
        assert_eq!(cache.queued(&zone("A")), 1);
    }

    #[test]
    fn has_ready_does_not_consume() {
        let cache = InMemoryInventoryCache::new();
        cache.enqueue(&zone("A"), AdHandle::from(7));

        assert!(cache.has_ready(&zone("A")));
        assert!(cache.has_ready(&zone("A")));
        assert_eq!(cache.dequeue(&zone("A")), Some(AdHandle::from(7)));
    }

    #[test]
    fn drained_queue_still_accepts_ads() {
        let cache = InMemoryInventoryCache::new();
        cache.enqueue(&zone("A"), AdHandle::from(1));
        cache.enqueue(&zone("B"), AdHandle::from(2));

        assert_eq!(cache.drain_all(), 2);
        assert_eq!(cache.total_queued(), 0);
        assert_eq!(cache.zones().len(), 2);

        cache.enqueue(&zone("A"), AdHandle::from(3));
        assert_eq!(cache.dequeue(&zone("A")), Some(AdHandle::from(3)));
    }

    #[test]
    fn concurrent_dequeues_never_hand_out_an_ad_twice() {
        let cache = Arc::new(InMemoryInventoryCache::new());
        let a = zone("A");
        for id in 0..200 {
            cache.enqueue(&a, AdHandle::from(id));
        }

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let a = a.clone();
                thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(ad) = cache.dequeue(&a) {
                        taken.push(ad.id().as_u64());
                    }
                    taken
                })
            })
            .collect();

        let mut all: Vec<u64> = workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect();
        all.sort_unstable();

        assert_eq!(all, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn concurrent_enqueues_are_not_lost() {
        let cache = Arc::new(InMemoryInventoryCache::new());
        let a = zone("A");

        let workers: Vec<_> = (0..4u64)
            .map(|worker| {
                let cache = cache.clone();
                let a = a.clone();
                thread::spawn(move || {
                    for n in 0..50 {
                        cache.enqueue(&a, AdHandle::from(worker * 1000 + n));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(cache.queued(&a), 200);
    }
}
