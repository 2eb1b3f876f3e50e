//! Least Frequently Used (LFU) Replacement Policy.
//!
//! This policy evicts the resident page with the lowest access count. When
//! several residents share the minimum count, the one admitted earliest is
//! evicted. A page's count restarts at one each time it is readmitted.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(N) where N is the frame count
//! - **Space Complexity:** O(N)
//! - **Best Case:** Stable hot sets with skewed popularity
//! - **Worst Case:** Phase changes (stale high counts pin pages that are no longer used)

use tracing::trace;

use super::ReplacementPolicy;
use crate::common::Page;

#[derive(Debug, Clone, Copy)]
struct LfuSlot {
    page: Page,
    /// Logical time at which the page was admitted.
    admitted_at: u64,
    frequency: u64,
}

/// LFU policy state.
#[derive(Debug, Clone)]
pub struct LfuPolicy {
    /// Residents in admission order.
    slots: Vec<LfuSlot>,
    capacity: usize,
    time: u64,
    page_faults: u64,
    hits: u64,
}

impl LfuPolicy {
    /// Creates an empty LFU policy.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of frames.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LFU policy needs at least one frame");
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

    fn admit(&mut self, page: Page) {
        if self.slots.len() >= self.capacity {
            let victim = self
                .slots
                .iter()
                .enumerate()
                .min_by_key(|(_, slot)| (slot.frequency, slot.admitted_at))
                .map(|(idx, _)| idx);
            if let Some(idx) = victim {
                let evicted = self.slots.remove(idx);
                trace!(
                    victim = evicted.page,
                    frequency = evicted.frequency,
                    page,
                    "lfu evict"
                );
            }
        }
        self.slots.push(LfuSlot {
            page,
            admitted_at: self.time,
            frequency: 1,
        });
    }
}

impl ReplacementPolicy for LfuPolicy {
    fn name(&self) -> String {
        "LFU".to_string()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page) -> bool {
        self.time += 1;
        if let Some(idx) = self.position(page) {
            self.slots[idx].frequency += 1;
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
