//! Predictive prefetching.
//!
//! This module contains the pattern predictor and the policy wrapper that
//! uses it to speculatively load pages ahead of demand:
//! 1. **Predictor:** Learns which page follows each fixed-length sequence of
//!    recent references and gates predictions behind an adaptive confidence
//!    threshold.
//! 2. **Prefetcher:** Wraps any [`ReplacementPolicy`](crate::units::policies::ReplacementPolicy),
//!    forwards demand accesses to it, and issues
//!    [`prefetch`](crate::units::policies::ReplacementPolicy::prefetch) calls for
//!    confident predictions without disturbing fault or hit accounting.

/// Sequence-frequency next-page predictor.
pub mod predictor;

/// Policy wrapper that prefetches predicted pages.
pub mod predictive;

pub use self::predictive::{PredictionStats, PredictivePrefetcher};
pub use self::predictor::{PatternPredictor, Prediction};
