//! Optimal (Belady) Replacement Policy.
//!
//! This policy looks ahead in the reference string and evicts the resident
//! page whose next use lies farthest in the future. It requires the whole
//! reference string up front and serves as the lower bound other policies are
//! measured against.
//!
//! The victim scan walks residents in frame order. The first resident that
//! never recurs is evicted immediately; otherwise the resident with the
//! strictly largest next-use distance wins, earlier frames winning ties.
//! The look-ahead starts one position past the current cursor, for demand
//! accesses and prefetches alike.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(N × R) on a fault, where R is the remaining reference length
//! - **Space Complexity:** O(N + R)

use tracing::trace;

use super::ReplacementPolicy;
use crate::common::Page;

/// Optimal policy state.
#[derive(Debug, Clone)]
pub struct OptimalPolicy {
    frames: Vec<Page>,
    capacity: usize,
    reference: Option<Vec<Page>>,
    /// Index of the next demand access in the reference string.
    cursor: usize,
    page_faults: u64,
    hits: u64,
}

impl OptimalPolicy {
    /// Creates an empty optimal policy with no reference string.
    ///
    /// [`set_reference_string`](ReplacementPolicy::set_reference_string) must be
    /// called before the first access.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Optimal policy needs at least one frame");
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
            reference: None,
            cursor: 0,
            page_faults: 0,
            hits: 0,
        }
    }

    /// Creates an optimal policy that will replay `reference`.
    pub fn with_reference(capacity: usize, reference: &[Page]) -> Self {
        let mut policy = Self::new(capacity);
        policy.set_reference_string(reference);
        policy
    }

    /// References after the current position.
    ///
    /// # Panics
    ///
    /// Panics if no reference string has been installed; accessing an optimal
    /// policy without one is a contract violation.
    fn upcoming(&self) -> &[Page] {
        let Some(reference) = self.reference.as_deref() else {
            panic!("Optimal policy used before set_reference_string");
        };
        reference.get(self.cursor + 1..).unwrap_or(&[])
    }

    /// Chooses the frame index to overwrite.
    fn victim(&self) -> usize {
        let upcoming = self.upcoming();
        let mut farthest: Option<usize> = None;
        let mut victim = 0;
        for (idx, &resident) in self.frames.iter().enumerate() {
            match upcoming.iter().position(|&p| p == resident) {
                None => return idx,
                Some(distance) => {
                    if farthest.is_none_or(|f| distance > f) {
                        farthest = Some(distance);
                        victim = idx;
                    }
                }
            }
        }
        victim
    }

    fn admit(&mut self, page: Page) {
        if self.frames.len() < self.capacity {
            self.frames.push(page);
            return;
        }
        let idx = self.victim();
        trace!(victim = self.frames[idx], page, "optimal evict");
        self.frames[idx] = page;
    }
}

impl ReplacementPolicy for OptimalPolicy {
    fn name(&self) -> String {
        "Optimal".to_string()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    /// # Panics
    ///
    /// Panics if no reference string has been installed.
    fn access(&mut self, page: Page) -> bool {
        assert!(
            self.reference.is_some(),
            "Optimal policy used before set_reference_string"
        );
        let fault = if self.frames.contains(&page) {
            self.hits += 1;
            false
        } else {
            self.page_faults += 1;
            self.admit(page);
            true
        };
        self.cursor += 1;
        fault
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

    /// Clears residents, counters and the cursor. The reference string is
    /// kept, matching a fresh policy built with the same input.
    fn reset(&mut self) {
        self.frames.clear();
        self.cursor = 0;
        self.page_faults = 0;
        self.hits = 0;
    }

    fn set_reference_string(&mut self, reference: &[Page]) {
        self.reference = Some(reference.to_vec());
        self.cursor = 0;
    }
}
