//! Clock (Second-Chance) Replacement Policy.
//!
//! Residents sit in a circular buffer, each with a use bit that is set on
//! admission and on every hit. On a fault with a full buffer, the hand sweeps
//! forward clearing set bits until it reaches a resident whose bit is already
//! clear; that resident is replaced, the new page's bit is set, and the hand
//! moves one past it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(N) worst case (one full sweep)
//! - **Space Complexity:** O(N)
//! - **Hardware Cost:** Low - one bit per frame plus a hand pointer
//! - **Best Case:** Approximates LRU on workloads with locality
//! - **Worst Case:** All bits set, degrading to FIFO order

use tracing::trace;

use super::ReplacementPolicy;
use crate::common::Page;

/// Clock policy state.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    frames: Vec<Page>,
    use_bits: Vec<bool>,
    hand: usize,
    capacity: usize,
    page_faults: u64,
    hits: u64,
}

impl ClockPolicy {
    /// Creates an empty clock policy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Clock policy needs at least one frame");
        Self {
            frames: Vec::with_capacity(capacity),
            use_bits: Vec::with_capacity(capacity),
            hand: 0,
            capacity,
            page_faults: 0,
            hits: 0,
        }
    }

    /// Current hand position.
    pub const fn hand(&self) -> usize {
        self.hand
    }

    /// Use bits in frame order.
    pub fn use_bits(&self) -> &[bool] {
        &self.use_bits
    }

    fn admit(&mut self, page: Page) {
        if self.frames.len() < self.capacity {
            self.frames.push(page);
            self.use_bits.push(true);
            return;
        }
        while self.use_bits[self.hand] {
            self.use_bits[self.hand] = false;
            self.hand = (self.hand + 1) % self.capacity;
        }
        trace!(victim = self.frames[self.hand], page, hand = self.hand, "clock evict");
        self.frames[self.hand] = page;
        self.use_bits[self.hand] = true;
        self.hand = (self.hand + 1) % self.capacity;
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn name(&self) -> String {
        "Clock".to_string()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page) -> bool {
        if let Some(idx) = self.frames.iter().position(|&p| p == page) {
            self.use_bits[idx] = true;
            self.hits += 1;
            return false;
        }
        self.page_faults += 1;
        self.admit(page);
        true
    }

    fn prefetch(&mut self, page: Page) -> bool {
        if self.frames.contains(&page) {
            return false;
        }
        self.admit(page);
        true
    }

    fn frames(&self) -> Vec<Page> {
        self.frames.clone()
    }

    fn contains(&self, page: Page) -> bool {
        self.frames.contains(&page)
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
        self.frames.clear();
        self.use_bits.clear();
        self.hand = 0;
        self.page_faults = 0;
        self.hits = 0;
    }
}
