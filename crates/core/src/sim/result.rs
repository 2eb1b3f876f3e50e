//! Simulation result bundle.
//!
//! A [`SimulationResult`] is built once at the end of a run and never
//! modified afterwards. It serializes to JSON without loss, so every field a
//! presentation layer or exporter needs is carried here.

use serde::{Deserialize, Serialize};

use crate::common::{Page, Result, SimError};
use crate::stats::PerformanceBreakdown;
use crate::units::prefetch::PredictionStats;
use crate::units::tlb::TlbStats;
use crate::units::working_set::WorkingSetStats;

/// State after one reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based step number.
    pub step: usize,
    /// Referenced page.
    pub page: Page,
    /// Residents after the reference, in policy order.
    pub frames: Vec<Page>,
    /// Whether the reference faulted.
    pub page_fault: bool,
    /// Whether the TLB served the reference; `None` when the TLB is disabled.
    pub tlb_hit: Option<bool>,
    /// Working-set size after the reference.
    pub working_set_size: usize,
}

/// Aggregate outcome of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Policy display name.
    pub algorithm: String,
    /// Frame capacity.
    pub frames: usize,
    /// Total faults.
    pub page_faults: u64,
    /// Total hits, including TLB hits.
    pub hits: u64,
    /// `hits / references`.
    pub hit_ratio: f64,
    /// `page_faults / references`.
    pub fault_ratio: f64,
    /// One record per reference, in order.
    pub history: Vec<StepRecord>,
    /// TLB counters, when the TLB is enabled.
    pub tlb_stats: Option<TlbStats>,
    /// Working-set tracker state at the end of the run.
    pub working_set_stats: WorkingSetStats,
    /// Timing model totals.
    pub performance: PerformanceBreakdown,
    /// Mean access time in nanoseconds.
    pub average_access_time: f64,
    /// Predictor counters, when predictive prefetching is enabled.
    pub prediction_stats: Option<PredictionStats>,
}

impl SimulationResult {
    /// Number of references replayed.
    pub const fn total_accesses(&self) -> usize {
        self.history.len()
    }

    /// Serializes the bundle as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Serialization`] if the JSON writer fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Serialization(e.to_string()))
    }
}
