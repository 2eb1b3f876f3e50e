//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the resident page that has not been accessed for the
//! longest time. Every access (and every prefetch admission) draws a fresh
//! value from a logical clock; the victim is the resident with the smallest
//! stamp. Stamps strictly increase, so ties cannot occur.
//!
//! Residents keep the slot they were admitted into: a hit refreshes the stamp
//! in place, and an eviction removes the victim's slot and appends the new
//! page, so [`frames`](ReplacementPolicy::frames) lists pages in admission order.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(N) where N is the frame count
//! - **Space Complexity:** O(N)
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Cyclic scans one page larger than the frame set (every access faults)

use tracing::trace;

use super::ReplacementPolicy;
use crate::common::Page;

/// A resident page and the logical time of its last use.
#[derive(Debug, Clone, Copy)]
struct LruSlot {
    page: Page,
    last_used: u64,
}

/// LRU policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    slots: Vec<LruSlot>,
    capacity: usize,
    /// Logical clock, advanced once per access.
    time: u64,
    page_faults: u64,
    hits: u64,
}

impl LruPolicy {
    /// Creates an empty LRU policy.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of frames.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LRU policy needs at least one frame");
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            time: 0,
            page_faults: 0,
            hits: 0,
        }
    }

    fn position(&self, page: Page) -> Option<usize> {
        self.slots.iter().position(|slot| slot.page == page)
    }

    /// Installs `page` stamped with the current time, evicting the least
    /// recently used resident when full.
    fn admit(&mut self, page: Page) {
        if self.slots.len() >= self.capacity {
            let victim = self
                .slots
                .iter()
                .enumerate()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(idx, _)| idx);
            if let Some(idx) = victim {
                let evicted = self.slots.remove(idx);
                trace!(victim = evicted.page, page, "lru evict");
            }
        }
        self.slots.push(LruSlot {
            page,
            last_used: self.time,
        });
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> String {
        "LRU".to_string()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page) -> bool {
        self.time += 1;
        if let Some(idx) = self.position(page) {
            self.slots[idx].last_used = self.time;
            self.hits += 1;
            return false;
        }
        self.page_faults += 1;
        self.admit(page);
        true
    }

    fn prefetch(&mut self, page: Page) -> bool {
        if self.position(page).is_some() {
            return false;
        }
        self.time += 1;
        self.admit(page);
        true
    }

    fn frames(&self) -> Vec<Page> {
        self.slots.iter().map(|slot| slot.page).collect()
    }

    fn contains(&self, page: Page) -> bool {
        self.position(page).is_some()
    }

    fn page_faults(&self) -> u64 {
        self.page_faults
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn record_hit(&mut self) {
        self.hits += 1;
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.time = 0;
        self.page_faults = 0;
        self.hits = 0;
    }
}
