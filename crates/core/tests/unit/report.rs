//! Text Report Tests.

use pagesim_core::config::{Algorithm, SimConfig};
use pagesim_core::sim::report::{RankingTable, Summary};
use pagesim_core::sim::{compare_all, rank};

use crate::common::{CLASSIC, no_tlb, run};

#[test]
fn summary_lists_core_metrics() {
    let result = run(&SimConfig::new(Algorithm::Fifo, 3), &CLASSIC);
    let text = Summary(&result).to_string();
    assert!(text.starts_with("Virtual Memory Simulation Report\n"));
    assert!(text.contains("Algorithm: FIFO"));
    assert!(text.contains("Total Accesses: 13"));
    assert!(text.contains("Page Faults: 10"));
    assert!(text.contains("Hits: 3"));
    assert!(text.contains("Hit Ratio: 23.08%"));
    assert!(text.contains("Fault Ratio: 76.92%"));
    assert!(text.contains("TLB Size: 3/4"));
    assert!(text.contains("Thrashing Detected: Yes"));
    assert!(!text.contains("Prediction Statistics"));
}

#[test]
fn summary_omits_disabled_sections() {
    let result = run(&no_tlb(Algorithm::Optimal, 3), &CLASSIC);
    let text = Summary(&result).to_string();
    assert!(!text.contains("TLB Statistics"));
    assert!(text.contains("Working Set Analysis"));
}

#[test]
fn summary_includes_prediction_stats() {
    let mut config = no_tlb(Algorithm::Lru, 3);
    config.predictor.enabled = true;
    let result = run(&config, &CLASSIC);
    let text = Summary(&result).to_string();
    assert!(text.contains("Algorithm: LRU + ML Prediction"));
    assert!(text.contains("Prediction Statistics"));
    assert!(text.contains("Patterns Learned:"));
}

#[test]
fn ranking_table_ends_with_recommendation() {
    let results = compare_all(&SimConfig::new(Algorithm::Lru, 3), &CLASSIC).unwrap();
    let text = RankingTable(&rank(&results)).to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("Rank"));
    assert!(lines[2].starts_with("1     Optimal"));
    assert!(lines.last().unwrap().starts_with("Recommendation: Optimal"));
}
