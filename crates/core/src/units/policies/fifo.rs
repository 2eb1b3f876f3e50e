//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the page that has been resident the longest, regardless
//! of how recently or how often it was accessed. Residents are kept in a queue
//! in admission order; hits do not reorder it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(N) residency check, O(1) admission
//! - **Space Complexity:** O(N) where N is the frame count
//! - **Best Case:** Streaming references where every page matters equally
//! - **Worst Case:** Strong temporal locality; also exhibits Belady's anomaly

use std::collections::VecDeque;

use tracing::trace;

use super::ReplacementPolicy;
use crate::common::Page;

/// FIFO policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Residents, oldest at the front.
    queue: VecDeque<Page>,
    capacity: usize,
    page_faults: u64,
    hits: u64,
}

impl FifoPolicy {
    /// Creates an empty FIFO policy.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of frames.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "FIFO policy needs at least one frame");
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            page_faults: 0,
            hits: 0,
        }
    }

    /// Appends `page` to the queue, evicting the head when full.
    fn admit(&mut self, page: Page) {
        if self.queue.len() >= self.capacity
            && let Some(victim) = self.queue.pop_front()
        {
            trace!(victim, page, "fifo evict");
        }
        self.queue.push_back(page);
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> String {
        "FIFO".to_string()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page) -> bool {
        if self.queue.contains(&page) {
            self.hits += 1;
            return false;
        }
        self.page_faults += 1;
        self.admit(page);
        true
    }

    fn prefetch(&mut self, page: Page) -> bool {
        if self.queue.contains(&page) {
            return false;
        }
        self.admit(page);
        true
    }

    fn frames(&self) -> Vec<Page> {
        self.queue.iter().copied().collect()
    }

    fn contains(&self, page: Page) -> bool {
        self.queue.contains(&page)
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
        self.queue.clear();
        self.page_faults = 0;
        self.hits = 0;
    }
}
