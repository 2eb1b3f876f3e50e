//! Plain-text summary report.

use std::fmt;

use super::compare::{Ranking, recommendation};
use super::result::SimulationResult;

const RULE_WIDTH: usize = 50;

/// Renders a [`SimulationResult`] as a human-readable report.
///
/// ```
/// use pagesim_core::config::{Algorithm, SimConfig};
/// use pagesim_core::sim::{Simulator, report::Summary};
///
/// let result = Simulator::new(&SimConfig::new(Algorithm::Fifo, 3), vec![1, 2, 3, 1])
///     .unwrap()
///     .run();
/// let text = Summary(&result).to_string();
/// assert!(text.contains("Algorithm: FIFO"));
/// assert!(text.contains("Page Faults: 3"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(pub &'a SimulationResult);

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}:")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Virtual Memory Simulation Report")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        writeln!(f, "Algorithm: {}", result.algorithm)?;
        writeln!(f, "Frames: {}", result.frames)?;
        writeln!(f)?;

        section(f, "Performance Metrics")?;
        writeln!(f, "Total Accesses: {}", result.total_accesses())?;
        writeln!(f, "Page Faults: {}", result.page_faults)?;
        writeln!(f, "Hits: {}", result.hits)?;
        writeln!(f, "Hit Ratio: {:.2}%", result.hit_ratio * 100.0)?;
        writeln!(f, "Fault Ratio: {:.2}%", result.fault_ratio * 100.0)?;
        writeln!(f, "Average Access Time: {:.1} ns", result.average_access_time)?;
        writeln!(f, "Total Time: {:.3} ms", result.performance.total_time_ms)?;
        writeln!(f)?;

        if let Some(tlb) = &result.tlb_stats {
            section(f, "TLB Statistics")?;
            writeln!(f, "TLB Hits: {}", tlb.hits)?;
            writeln!(f, "TLB Misses: {}", tlb.misses)?;
            writeln!(f, "TLB Hit Ratio: {:.2}%", tlb.hit_ratio * 100.0)?;
            writeln!(f, "TLB Size: {}/{}", tlb.size, tlb.capacity)?;
            writeln!(f)?;
        }

        let ws = &result.working_set_stats;
        section(f, "Working Set Analysis")?;
        writeln!(f, "Final Working Set Size: {}", ws.current_working_set)?;
        writeln!(f, "Fault Rate: {:.2}%", ws.fault_rate * 100.0)?;
        writeln!(
            f,
            "Thrashing Detected: {}",
            if ws.is_thrashing { "Yes" } else { "No" }
        )?;

        if let Some(ml) = &result.prediction_stats {
            writeln!(f)?;
            section(f, "Prediction Statistics")?;
            writeln!(
                f,
                "Accuracy: {:.1}% ({}/{} correct)",
                ml.accuracy, ml.correct_predictions, ml.total_predictions
            )?;
            writeln!(f, "Patterns Learned: {}", ml.patterns_learned)?;
            writeln!(f, "Confidence Threshold: {:.2}", ml.confidence_threshold)?;
            writeln!(
                f,
                "Prefetches: {} attempted, {} hits, {} skipped",
                ml.prefetch_attempts, ml.prefetch_hits, ml.prefetch_skips
            )?;
            writeln!(f, "Prefetch Effectiveness: {:.1}%", ml.prefetch_effectiveness)?;
        }
        Ok(())
    }
}

/// Renders a ranking table followed by the recommendation line.
#[derive(Debug, Clone, Copy)]
pub struct RankingTable<'a>(pub &'a [Ranking]);

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<6}{:<12}{:>8}{:>8}{:>12}{:>16}",
            "Rank", "Algorithm", "Score", "Faults", "Hit Ratio", "Avg Time (us)"
        )?;
        writeln!(f, "{}", "-".repeat(62))?;
        for r in self.0 {
            writeln!(
                f,
                "{:<6}{:<12}{:>8.1}{:>8}{:>11.2}%{:>16.2}",
                r.rank,
                r.algorithm,
                r.efficiency_score,
                r.page_faults,
                r.hit_ratio * 100.0,
                r.avg_access_time_us
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Recommendation: {}", recommendation(self.0))
    }
}
