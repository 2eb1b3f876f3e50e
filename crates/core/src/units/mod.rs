//! Simulation units.
//!
//! This module contains the components the simulator drives for every page
//! reference: the replacement policies, the translation cache, the working-set
//! tracker and the predictive prefetcher that can wrap any policy.

/// Page replacement policies (FIFO, LRU, LFU, Optimal, Clock).
pub mod policies;

/// Pattern-learning predictive prefetcher.
pub mod prefetch;

/// Translation Lookaside Buffer caching page-to-frame mappings.
pub mod tlb;

/// Sliding-window working-set and thrashing detector.
pub mod working_set;
