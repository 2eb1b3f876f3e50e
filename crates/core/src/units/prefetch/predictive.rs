//! Predictive Prefetching Policy Wrapper.
//!
//! [`PredictivePrefetcher`] owns a replacement policy and is itself a
//! [`ReplacementPolicy`], so it can stand in wherever a policy is expected.
//! Each demand access runs through the following steps:
//!
//! 1. If the page is waiting in the prefetch buffer, it leaves the buffer; it
//!    counts as a prefetch hit if it is still resident.
//! 2. The prediction made after the previous access is verified against the
//!    page and the confidence threshold adapts.
//! 3. The predictor learns the page as the successor of the preceding pattern.
//! 4. The access is forwarded to the wrapped policy. This is the only step
//!    that moves the fault and hit counters.
//! 5. The next page is predicted from the updated pattern.
//! 6. A prediction above the threshold is skipped if the page is already
//!    resident (or was just accessed); otherwise the page is prefetched into
//!    the wrapped policy and added to the buffer. The prediction is kept for
//!    verification at the next access.
//!
//! [`PredictivePrefetcher::observe_access`] runs every step except 4, for
//! evaluating the predictor alongside a separately driven base policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::predictor::PatternPredictor;
use crate::common::Page;
use crate::config::PredictorConfig;
use crate::units::policies::ReplacementPolicy;

/// Aggregate predictor and prefetch counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    /// Predictions verified against a later access.
    pub total_predictions: u64,
    /// Verified predictions that matched.
    pub correct_predictions: u64,
    /// Verified predictions that did not match.
    pub incorrect_predictions: u64,
    /// `correct / total` as a percentage.
    pub accuracy: f64,
    /// Distinct patterns with a recorded successor.
    pub patterns_learned: usize,
    /// Current confidence threshold.
    pub confidence_threshold: f64,
    /// Accuracy over the rolling window, as a percentage.
    pub recent_accuracy: f64,
    /// Prefetched pages that were demanded while still resident.
    pub prefetch_hits: u64,
    /// Prefetches issued to the wrapped policy.
    pub prefetch_attempts: u64,
    /// Confident predictions that needed no prefetch.
    pub prefetch_skips: u64,
    /// Prefetches the wrapped policy declined.
    pub prefetch_misses: u64,
    /// `prefetch_hits / prefetch_attempts` as a percentage.
    pub prefetch_effectiveness: f64,
}

/// A replacement policy augmented with pattern-driven prefetching.
#[derive(Debug)]
pub struct PredictivePrefetcher<P = Box<dyn ReplacementPolicy>> {
    inner: P,
    predictor: PatternPredictor,
    /// Prefetched pages not yet demanded.
    buffer: HashSet<Page>,
    /// Prediction made after the last access, awaiting verification.
    pending: Option<Page>,
    prefetch_hits: u64,
    prefetch_attempts: u64,
    prefetch_skips: u64,
    prefetch_misses: u64,
}

impl<P: ReplacementPolicy> PredictivePrefetcher<P> {
    /// Wraps `inner` using the default predictor settings.
    pub fn new(inner: P) -> Self {
        Self::with_config(inner, PredictorConfig::default())
    }

    /// Wraps `inner` with an explicit predictor configuration.
    pub fn with_config(inner: P, config: PredictorConfig) -> Self {
        Self {
            inner,
            predictor: PatternPredictor::new(config),
            buffer: HashSet::new(),
            pending: None,
            prefetch_hits: 0,
            prefetch_attempts: 0,
            prefetch_skips: 0,
            prefetch_misses: 0,
        }
    }

    /// The wrapped policy.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwraps the prefetcher, returning the wrapped policy.
    pub fn into_inner(self) -> P {
        self.inner
    }

    /// The underlying predictor.
    pub const fn predictor(&self) -> &PatternPredictor {
        &self.predictor
    }

    /// Prefetched pages that have not been demanded yet.
    pub const fn prefetch_buffer(&self) -> &HashSet<Page> {
        &self.buffer
    }

    /// Steps 1-3: settle the buffer, verify the pending prediction, learn.
    fn before_access(&mut self, page: Page) {
        if self.buffer.remove(&page) && self.inner.contains(page) {
            self.prefetch_hits += 1;
        }
        if let Some(predicted) = self.pending.take() {
            let _ = self.predictor.verify(predicted, page);
        }
        self.predictor.record(page);
    }

    /// Steps 5-6: predict the next page and prefetch it when confident.
    fn after_access(&mut self, page: Page) {
        let Some(prediction) = self.predictor.predict() else {
            return;
        };
        if prediction.confidence <= self.predictor.threshold() {
            return;
        }
        let predicted = prediction.page;
        if predicted == page || self.inner.contains(predicted) {
            self.prefetch_skips += 1;
        } else {
            self.prefetch_attempts += 1;
            if self.inner.prefetch(predicted) {
                trace!(page = predicted, confidence = prediction.confidence, "prefetch");
                let _ = self.buffer.insert(predicted);
            } else {
                self.prefetch_misses += 1;
            }
        }
        self.pending = Some(predicted);
    }

    /// Runs the predictor on `page` without a demand access to the wrapped
    /// policy. Prefetches are still issued.
    pub fn observe_access(&mut self, page: Page) {
        self.before_access(page);
        self.after_access(page);
    }

    /// Snapshot of predictor and prefetch counters.
    pub fn stats(&self) -> PredictionStats {
        let total = self.predictor.total_predictions();
        let correct = self.predictor.correct_predictions();
        let effectiveness = if self.prefetch_attempts == 0 {
            0.0
        } else {
            self.prefetch_hits as f64 / self.prefetch_attempts as f64 * 100.0
        };
        PredictionStats {
            total_predictions: total,
            correct_predictions: correct,
            incorrect_predictions: total - correct,
            accuracy: self.predictor.accuracy(),
            patterns_learned: self.predictor.patterns_learned(),
            confidence_threshold: self.predictor.threshold(),
            recent_accuracy: self.predictor.rolling_accuracy() * 100.0,
            prefetch_hits: self.prefetch_hits,
            prefetch_attempts: self.prefetch_attempts,
            prefetch_skips: self.prefetch_skips,
            prefetch_misses: self.prefetch_misses,
            prefetch_effectiveness: effectiveness,
        }
    }
}

impl<P: ReplacementPolicy> ReplacementPolicy for PredictivePrefetcher<P> {
    fn name(&self) -> String {
        format!("{} + ML Prediction", self.inner.name())
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn access(&mut self, page: Page) -> bool {
        self.before_access(page);
        let fault = self.inner.access(page);
        self.after_access(page);
        fault
    }

    fn prefetch(&mut self, page: Page) -> bool {
        self.inner.prefetch(page)
    }

    fn frames(&self) -> Vec<Page> {
        self.inner.frames()
    }

    fn contains(&self, page: Page) -> bool {
        self.inner.contains(page)
    }

    fn page_faults(&self) -> u64 {
        self.inner.page_faults()
    }

    fn hits(&self) -> u64 {
        self.inner.hits()
    }

    fn record_hit(&mut self) {
        self.inner.record_hit();
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.predictor.reset();
        self.buffer.clear();
        self.pending = None;
        self.prefetch_hits = 0;
        self.prefetch_attempts = 0;
        self.prefetch_skips = 0;
        self.prefetch_misses = 0;
    }

    fn set_reference_string(&mut self, reference: &[Page]) {
        self.inner.set_reference_string(reference);
    }

    fn prediction_stats(&self) -> Option<PredictionStats> {
        Some(self.stats())
    }
}
