//! Page Replacement Policies.
//!
//! Implements the algorithms that decide which resident page to evict when a
//! faulting page must be admitted into a full frame set.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Lfu`: Least Frequently Used (oldest admission breaks ties).
//! - `Optimal`: Belady's farthest-next-use rule over a known reference string.
//! - `Clock`: Second-chance circular scan over use bits.

/// Second-chance clock replacement policy.
pub mod clock;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Belady's optimal replacement policy.
pub mod optimal;

use std::fmt;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;

use crate::common::Page;
use crate::config::Algorithm;
use crate::units::prefetch::PredictionStats;

/// Trait for page replacement policies.
///
/// A policy owns the resident frame set together with the fault and hit
/// counters. Residents are only changed through [`access`](Self::access) and
/// [`prefetch`](Self::prefetch); the frame set never exceeds
/// [`capacity`](Self::capacity) pages.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Display name of the policy ("FIFO", "LRU", ...).
    fn name(&self) -> String;

    /// Maximum number of resident pages.
    fn capacity(&self) -> usize;

    /// Performs a demand access to `page`.
    ///
    /// A resident page counts as a hit and refreshes the policy's bookkeeping.
    /// Otherwise the access counts as a fault and the page is admitted,
    /// evicting a victim if the frame set is full.
    ///
    /// # Returns
    ///
    /// `true` if the access faulted.
    fn access(&mut self, page: Page) -> bool;

    /// Speculatively admits `page` using the same eviction rule as
    /// [`access`](Self::access), without touching the fault or hit counters.
    ///
    /// # Returns
    ///
    /// `false` if the page was already resident (nothing changes), `true`
    /// once it has been installed.
    fn prefetch(&mut self, page: Page) -> bool;

    /// Current residents in policy-defined order.
    ///
    /// The position of a page in this sequence is its frame index.
    fn frames(&self) -> Vec<Page>;

    /// Returns `true` if `page` is resident.
    fn contains(&self, page: Page) -> bool {
        self.frames().contains(&page)
    }

    /// Total faults counted by [`access`](Self::access).
    fn page_faults(&self) -> u64;

    /// Total hits counted by [`access`](Self::access) and [`record_hit`](Self::record_hit).
    fn hits(&self) -> u64;

    /// Counts a hit that was served before reaching the policy (a TLB hit).
    ///
    /// Only the hit counter moves; recency, frequency and use bits are left
    /// untouched.
    fn record_hit(&mut self);

    /// Clears residents, counters and bookkeeping back to the freshly
    /// constructed state.
    fn reset(&mut self);

    /// Installs the full reference string ahead of the run.
    ///
    /// Only policies that look into the future need it; the default ignores it.
    fn set_reference_string(&mut self, _reference: &[Page]) {}

    /// Prediction statistics, for policies wrapped in a predictive prefetcher.
    fn prediction_stats(&self) -> Option<PredictionStats> {
        None
    }
}

impl<P: ReplacementPolicy + ?Sized> ReplacementPolicy for Box<P> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn access(&mut self, page: Page) -> bool {
        (**self).access(page)
    }

    fn prefetch(&mut self, page: Page) -> bool {
        (**self).prefetch(page)
    }

    fn frames(&self) -> Vec<Page> {
        (**self).frames()
    }

    fn contains(&self, page: Page) -> bool {
        (**self).contains(page)
    }

    fn page_faults(&self) -> u64 {
        (**self).page_faults()
    }

    fn hits(&self) -> u64 {
        (**self).hits()
    }

    fn record_hit(&mut self) {
        (**self).record_hit();
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn set_reference_string(&mut self, reference: &[Page]) {
        (**self).set_reference_string(reference);
    }

    fn prediction_stats(&self) -> Option<PredictionStats> {
        (**self).prediction_stats()
    }
}

/// Builds a boxed policy for `algorithm` with `frames` frames.
///
/// `reference` is installed through
/// [`set_reference_string`](ReplacementPolicy::set_reference_string), which the
/// optimal policy requires before its first access.
pub fn build(algorithm: Algorithm, frames: usize, reference: &[Page]) -> Box<dyn ReplacementPolicy> {
    let mut policy: Box<dyn ReplacementPolicy> = match algorithm {
        Algorithm::Fifo => Box::new(FifoPolicy::new(frames)),
        Algorithm::Lru => Box::new(LruPolicy::new(frames)),
        Algorithm::Lfu => Box::new(LfuPolicy::new(frames)),
        Algorithm::Optimal => Box::new(OptimalPolicy::new(frames)),
        Algorithm::Clock => Box::new(ClockPolicy::new(frames)),
    };
    policy.set_reference_string(reference);
    policy
}
