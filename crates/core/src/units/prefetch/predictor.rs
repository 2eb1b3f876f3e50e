//! Sequence-Frequency Page Predictor.
//!
//! The predictor keeps a bounded history of recent references. Each time a
//! reference arrives, the `pattern_depth` references preceding it form a
//! pattern and the predictor counts which page followed that pattern. The
//! prediction for the next reference is the most frequent successor of the
//! current pattern, with confidence equal to its share of all successors seen.
//!
//! Verified predictions feed a rolling accuracy window that nudges the
//! confidence threshold: sustained accuracy lowers it so more prefetches are
//! issued, poor accuracy raises it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record()`: O(D + S) where D is the pattern depth and S the successors of a pattern
//!   - `predict()`: O(D + S)
//! - **Space Complexity:** O(P × S) where P is the number of distinct patterns

use std::collections::{HashMap, VecDeque};

use crate::common::Page;
use crate::config::PredictorConfig;

/// A predicted next page and the confidence behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// The page expected to be referenced next.
    pub page: Page,
    /// Share of this pattern's successors that were `page`, in `(0, 1]`.
    pub confidence: f64,
}

/// Successor counts for one pattern, in first-seen order.
type Successors = Vec<(Page, u64)>;

/// Sequence-frequency predictor state.
#[derive(Clone, Debug)]
pub struct PatternPredictor {
    config: PredictorConfig,
    history: VecDeque<Page>,
    patterns: HashMap<Vec<Page>, Successors>,
    threshold: f64,
    /// Outcomes of the most recent verified predictions.
    recent: VecDeque<bool>,
    total_predictions: u64,
    correct_predictions: u64,
}

impl PatternPredictor {
    /// Creates an untrained predictor.
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.history_window + 1),
            patterns: HashMap::new(),
            threshold: config.initial_threshold,
            recent: VecDeque::with_capacity(config.accuracy_window + 1),
            total_predictions: 0,
            correct_predictions: 0,
            config,
        }
    }

    /// The last `pattern_depth` references, if that many have been seen.
    fn current_pattern(&self) -> Option<Vec<Page>> {
        let depth = self.config.pattern_depth;
        if self.history.len() < depth {
            return None;
        }
        Some(self.history.iter().skip(self.history.len() - depth).copied().collect())
    }

    /// Learns from a reference: credits `page` as the successor of the
    /// current pattern, then appends it to the history.
    pub fn record(&mut self, page: Page) {
        if let Some(pattern) = self.current_pattern() {
            let successors = self.patterns.entry(pattern).or_default();
            match successors.iter_mut().find(|(p, _)| *p == page) {
                Some((_, count)) => *count += 1,
                None => successors.push((page, 1)),
            }
        }
        self.history.push_back(page);
        if self.history.len() > self.config.history_window {
            let _ = self.history.pop_front();
        }
    }

    /// Predicts the reference following the current pattern.
    ///
    /// The successor with the highest count wins; among equal counts the one
    /// seen first for this pattern is chosen.
    pub fn predict(&self) -> Option<Prediction> {
        let pattern = self.current_pattern()?;
        let successors = self.patterns.get(&pattern)?;
        let total: u64 = successors.iter().map(|&(_, count)| count).sum();
        let mut best: Option<(Page, u64)> = None;
        for &(page, count) in successors {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((page, count));
            }
        }
        let (page, count) = best?;
        Some(Prediction {
            page,
            confidence: count as f64 / total as f64,
        })
    }

    /// Scores a previous prediction against the reference that actually
    /// arrived and adapts the threshold.
    ///
    /// # Returns
    ///
    /// `true` if the prediction was correct.
    pub fn verify(&mut self, predicted: Page, actual: Page) -> bool {
        let correct = predicted == actual;
        self.total_predictions += 1;
        if correct {
            self.correct_predictions += 1;
        }
        self.recent.push_back(correct);
        if self.recent.len() > self.config.accuracy_window {
            let _ = self.recent.pop_front();
        }
        self.adapt_threshold();
        correct
    }

    fn adapt_threshold(&mut self) {
        if self.recent.len() < self.config.min_accuracy_samples {
            return;
        }
        let accuracy = self.rolling_accuracy();
        if accuracy > self.config.lower_above {
            self.threshold = (self.threshold - self.config.threshold_step).max(self.config.min_threshold);
        } else if accuracy < self.config.raise_below {
            self.threshold = (self.threshold + self.config.threshold_step).min(self.config.max_threshold);
        }
    }

    /// Share of correct predictions in the rolling window, or 0 when empty.
    pub fn rolling_accuracy(&self) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        self.recent.iter().filter(|&&c| c).count() as f64 / self.recent.len() as f64
    }

    /// Confidence a prediction must exceed to trigger a prefetch.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Predictions verified so far.
    pub const fn total_predictions(&self) -> u64 {
        self.total_predictions
    }

    /// Verified predictions that matched.
    pub const fn correct_predictions(&self) -> u64 {
        self.correct_predictions
    }

    /// Overall accuracy as a percentage, or 0 with no predictions.
    pub fn accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.total_predictions as f64 * 100.0
    }

    /// Number of distinct patterns with at least one recorded successor.
    pub fn patterns_learned(&self) -> usize {
        self.patterns.len()
    }

    /// Forgets everything learned.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

impl Default for PatternPredictor {
    fn default() -> Self {
        Self::new(PredictorConfig::default())
    }
}
