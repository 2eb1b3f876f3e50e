//! Pattern Predictor and Predictive Prefetch Tests.
//!
//! Verifies pattern learning, confidence, threshold adaptation and the
//! prefetching wrapper's counters against known workloads.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pagesim_core::config::{Algorithm, PredictorConfig};
use pagesim_core::units::policies::{self, FifoPolicy, LruPolicy, ReplacementPolicy};
use pagesim_core::units::prefetch::{PatternPredictor, PredictivePrefetcher};
use pagesim_core::workloads;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn loop_workload() -> Vec<u64> {
    workloads::repeat(&[1, 2, 3, 4], 5)
}

// ══════════════════════════════════════════════════════════
// 1. Predictor
// ══════════════════════════════════════════════════════════

#[test]
fn no_prediction_for_unseen_pattern() {
    let mut predictor = PatternPredictor::default();
    for page in [1, 2, 3] {
        predictor.record(page);
    }
    assert_eq!(predictor.predict(), None);
    assert_eq!(predictor.patterns_learned(), 0);
}

#[test]
fn learns_successor_of_pattern() {
    let mut predictor = PatternPredictor::default();
    for page in [1, 2, 3, 4, 1, 2, 3] {
        predictor.record(page);
    }
    let prediction = predictor.predict().unwrap();
    assert_eq!(prediction.page, 4);
    assert!(close(prediction.confidence, 1.0));
}

#[test]
fn confidence_is_share_of_successors() {
    let mut predictor = PatternPredictor::default();
    // (1, 2, 3) is followed by 4 twice and by 5 once.
    for page in [1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 5, 1, 2, 3] {
        predictor.record(page);
    }
    let prediction = predictor.predict().unwrap();
    assert_eq!(prediction.page, 4);
    assert!(close(prediction.confidence, 2.0 / 3.0));
}

#[test]
fn first_seen_successor_wins_ties() {
    let mut predictor = PatternPredictor::default();
    for page in [1, 2, 3, 9, 1, 2, 3, 8, 1, 2, 3] {
        predictor.record(page);
    }
    let prediction = predictor.predict().unwrap();
    assert_eq!(prediction.page, 9);
    assert!(close(prediction.confidence, 0.5));
}

#[test]
fn accuracy_counts_verified_predictions() {
    let mut predictor = PatternPredictor::default();
    assert_eq!(predictor.accuracy(), 0.0);
    assert!(predictor.verify(4, 4));
    assert!(!predictor.verify(4, 5));
    assert_eq!(predictor.total_predictions(), 2);
    assert_eq!(predictor.correct_predictions(), 1);
    assert!(close(predictor.accuracy(), 50.0));
    assert!(close(predictor.rolling_accuracy(), 0.5));
}

#[test]
fn threshold_holds_until_enough_samples() {
    let mut predictor = PatternPredictor::default();
    for _ in 0..9 {
        let _ = predictor.verify(1, 1);
    }
    assert!(close(predictor.threshold(), 0.5));
    let _ = predictor.verify(1, 1);
    assert!(close(predictor.threshold(), 0.45));
}

#[test]
fn sustained_accuracy_lowers_threshold_to_floor() {
    let mut predictor = PatternPredictor::default();
    for _ in 0..40 {
        let _ = predictor.verify(1, 1);
    }
    assert!(close(predictor.threshold(), 0.3));
}

#[test]
fn poor_accuracy_raises_threshold_to_ceiling() {
    let mut predictor = PatternPredictor::default();
    for _ in 0..10 {
        let _ = predictor.verify(1, 2);
    }
    assert!(close(predictor.threshold(), 0.55));
    for _ in 0..20 {
        let _ = predictor.verify(1, 2);
    }
    assert!(close(predictor.threshold(), 0.7));
}

#[test]
fn middling_accuracy_keeps_threshold() {
    let mut predictor = PatternPredictor::default();
    for i in 0..20 {
        let _ = predictor.verify(1, if i % 3 == 0 { 2 } else { 1 });
    }
    assert!(close(predictor.threshold(), 0.5));
}

#[test]
fn predictor_reset_forgets_everything() {
    let mut predictor = PatternPredictor::default();
    for page in loop_workload() {
        predictor.record(page);
    }
    for _ in 0..12 {
        let _ = predictor.verify(1, 1);
    }
    predictor.reset();
    assert_eq!(predictor.predict(), None);
    assert_eq!(predictor.patterns_learned(), 0);
    assert_eq!(predictor.total_predictions(), 0);
    assert!(close(predictor.threshold(), 0.5));
}

#[test]
fn custom_depth() {
    let config = PredictorConfig {
        pattern_depth: 1,
        ..PredictorConfig::default()
    };
    let mut predictor = PatternPredictor::new(config);
    for page in [5, 6, 5] {
        predictor.record(page);
    }
    assert_eq!(predictor.predict().map(|p| p.page), Some(6));
}

// ══════════════════════════════════════════════════════════
// 2. Prefetching wrapper
// ══════════════════════════════════════════════════════════

#[test]
fn loop_workload_prefetches_every_next_page() {
    let mut policy = PredictivePrefetcher::new(FifoPolicy::new(3));
    for page in loop_workload() {
        let _ = policy.access(page);
    }
    assert_eq!(policy.page_faults(), 7);
    assert_eq!(policy.hits(), 13);

    let stats = policy.stats();
    assert_eq!(stats.total_predictions, 13);
    assert_eq!(stats.correct_predictions, 13);
    assert_eq!(stats.incorrect_predictions, 0);
    assert_eq!(stats.patterns_learned, 4);
    assert_eq!(stats.prefetch_attempts, 14);
    assert_eq!(stats.prefetch_hits, 13);
    assert_eq!(stats.prefetch_skips, 0);
    assert_eq!(stats.prefetch_misses, 0);
    assert!(close(stats.accuracy, 100.0));
    assert!(close(stats.confidence_threshold, 0.3));
    assert!(close(stats.prefetch_effectiveness, 13.0 / 14.0 * 100.0));
}

#[test]
fn locality_burst_workload() {
    let reference = workloads::locality_burst(&[1, 2, 3], &[4, 5, 6, 7], 8);
    let mut policy = PredictivePrefetcher::new(FifoPolicy::new(3));
    for &page in &reference {
        let _ = policy.access(page);
    }
    assert_eq!(policy.page_faults(), 17);

    let stats = policy.stats();
    assert_eq!(stats.total_predictions, 116);
    assert_eq!(stats.correct_predictions, 108);
    assert_eq!(stats.prefetch_attempts, 40);
    assert_eq!(stats.prefetch_hits, 39);
    assert_eq!(stats.prefetch_skips, 77);
    assert_eq!(stats.patterns_learned, 9);
    assert!(close(stats.recent_accuracy, 90.0));
}

#[rstest]
fn counters_read_through_to_inner(
    #[values(Algorithm::Fifo, Algorithm::Lru, Algorithm::Lfu, Algorithm::Optimal, Algorithm::Clock)]
    algorithm: Algorithm,
) {
    let reference = loop_workload();
    let mut policy = PredictivePrefetcher::new(policies::build(algorithm, 3, &reference));
    for &page in &reference {
        let _ = policy.access(page);
        assert_eq!(policy.page_faults(), policy.inner().page_faults());
        assert_eq!(policy.hits(), policy.inner().hits());
        assert_eq!(policy.frames(), policy.inner().frames());
    }
    assert_eq!(policy.page_faults() + policy.hits(), reference.len() as u64);
    assert!(policy.name().ends_with(" + ML Prediction"));
}

#[rstest]
fn unpredictable_string_matches_base(
    #[values(Algorithm::Fifo, Algorithm::Lru, Algorithm::Lfu, Algorithm::Optimal, Algorithm::Clock)]
    algorithm: Algorithm,
) {
    let reference: Vec<u64> = (0..25).collect();
    let mut base = policies::build(algorithm, 3, &reference);
    let mut wrapped = PredictivePrefetcher::new(policies::build(algorithm, 3, &reference));
    for &page in &reference {
        assert_eq!(base.access(page), wrapped.access(page));
    }
    assert_eq!(base.page_faults(), wrapped.page_faults());
    assert_eq!(wrapped.stats().prefetch_attempts, 0);
}

#[test]
fn observe_access_leaves_counters_alone() {
    let mut policy = PredictivePrefetcher::new(FifoPolicy::new(3));
    for page in loop_workload() {
        policy.observe_access(page);
    }
    assert_eq!((policy.page_faults(), policy.hits()), (0, 0));
    let stats = policy.stats();
    assert_eq!(stats.total_predictions, 13);
    assert_eq!(stats.prefetch_attempts, 14);
    assert_eq!(stats.prefetch_hits, 13);
}

#[test]
fn prefetch_buffer_drains_on_demand() {
    let mut policy = PredictivePrefetcher::new(LruPolicy::new(3));
    for page in [1, 2, 3, 4, 1, 2, 3] {
        let _ = policy.access(page);
    }
    // (1, 2, 3) -> 4 is known, so 4 was prefetched after the last access.
    assert!(policy.prefetch_buffer().contains(&4));
    assert!(policy.contains(4));
    assert!(!policy.access(4));
    assert!(!policy.prefetch_buffer().contains(&4));
    assert_eq!(policy.stats().prefetch_hits, 1);
}

#[test]
fn reset_clears_wrapper_and_inner() {
    let mut policy = PredictivePrefetcher::new(FifoPolicy::new(3));
    let reference = loop_workload();
    let first: Vec<bool> = reference.iter().map(|&p| policy.access(p)).collect();
    policy.reset();
    assert!(policy.frames().is_empty());
    assert_eq!(policy.stats().total_predictions, 0);
    assert!(policy.prefetch_buffer().is_empty());

    let second: Vec<bool> = reference.iter().map(|&p| policy.access(p)).collect();
    assert_eq!(first, second);
}

#[test]
fn prediction_stats_only_for_wrapped() {
    let plain = FifoPolicy::new(2);
    let wrapped = PredictivePrefetcher::new(FifoPolicy::new(2));
    assert!(plain.prediction_stats().is_none());
    assert!(wrapped.prediction_stats().is_some());
    assert_eq!(wrapped.into_inner().capacity(), 2);
}
