//! Multi-run comparisons.
//!
//! Each run owns its own policy, TLB, tracker and timing model, so comparing
//! algorithms is a set of independent simulations. [`compare_all`] runs them
//! on the rayon thread pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::result::SimulationResult;
use super::simulator::Simulator;
use crate::common::{Page, Result};
use crate::config::{Algorithm, SimConfig};

/// Base policy vs. the same policy with predictive prefetching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MlComparison {
    /// Run without prefetching.
    pub base: SimulationResult,
    /// Run with prefetching.
    pub enhanced: SimulationResult,
    /// `base.page_faults - enhanced.page_faults` (negative if prefetching hurt).
    pub fault_reduction: i64,
    /// Fault reduction as a percentage of the base faults.
    pub improvement_pct: f64,
}

/// Position of one algorithm in a ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based rank.
    pub rank: usize,
    /// Algorithm display name.
    pub algorithm: String,
    /// Weighted score in `[0, 100]`.
    pub efficiency_score: f64,
    /// Total faults.
    pub page_faults: u64,
    /// Mean access time in microseconds.
    pub avg_access_time_us: f64,
    /// Hit ratio.
    pub hit_ratio: f64,
}

/// Runs every algorithm in [`Algorithm::ALL`] on `reference`.
///
/// All settings other than `config.algorithm` are shared. Results come back
/// in `Algorithm::ALL` order.
///
/// # Errors
///
/// Returns the first construction error; in that case no run is performed.
pub fn compare_all(config: &SimConfig, reference: &[Page]) -> Result<Vec<SimulationResult>> {
    let simulators = Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let config = SimConfig {
                algorithm,
                ..config.clone()
            };
            Simulator::new(&config, reference.to_vec())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(simulators.into_par_iter().map(Simulator::run).collect())
}

/// Runs `config.algorithm` with and without predictive prefetching.
///
/// # Errors
///
/// Returns the construction error of either run.
pub fn compare_ml(config: &SimConfig, reference: &[Page]) -> Result<MlComparison> {
    let mut base_config = config.clone();
    base_config.predictor.enabled = false;
    let mut ml_config = config.clone();
    ml_config.predictor.enabled = true;

    let base = Simulator::new(&base_config, reference.to_vec())?.run();
    let enhanced = Simulator::new(&ml_config, reference.to_vec())?.run();

    let fault_reduction = signed(base.page_faults) - signed(enhanced.page_faults);
    let improvement_pct = if base.page_faults == 0 {
        0.0
    } else {
        fault_reduction as f64 / base.page_faults as f64 * 100.0
    };
    Ok(MlComparison {
        base,
        enhanced,
        fault_reduction,
        improvement_pct,
    })
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Weighted efficiency of a run in `[0, 100]`.
///
/// Half the weight goes to the hit ratio and 30% to the TLB hit ratio; a run
/// that ended thrashing has its score halved.
pub fn efficiency_score(result: &SimulationResult) -> f64 {
    let tlb_hit_ratio = result.tlb_stats.map_or(0.0, |tlb| tlb.hit_ratio);
    let mut score = result.hit_ratio.mul_add(0.5, tlb_hit_ratio * 0.3) * 100.0;
    if result.working_set_stats.is_thrashing {
        score *= 0.5;
    }
    score.clamp(0.0, 100.0)
}

/// Ranks runs by score (descending), then faults and mean access time
/// (ascending).
pub fn rank(results: &[SimulationResult]) -> Vec<Ranking> {
    let mut rankings: Vec<Ranking> = results
        .iter()
        .map(|result| Ranking {
            rank: 0,
            algorithm: result.algorithm.clone(),
            efficiency_score: efficiency_score(result),
            page_faults: result.page_faults,
            avg_access_time_us: result.average_access_time / 1000.0,
            hit_ratio: result.hit_ratio,
        })
        .collect();
    rankings.sort_by(|a, b| {
        b.efficiency_score
            .total_cmp(&a.efficiency_score)
            .then(a.page_faults.cmp(&b.page_faults))
            .then(a.avg_access_time_us.total_cmp(&b.avg_access_time_us))
    });
    for (idx, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = idx + 1;
    }
    rankings
}

/// One-line advice based on the top-ranked algorithm.
pub fn recommendation(rankings: &[Ranking]) -> String {
    let Some(best) = rankings.first() else {
        return "No data available".to_string();
    };
    let score = best.efficiency_score;
    let verdict = if score >= 80.0 {
        "Excellent performance with high efficiency"
    } else if score >= 60.0 {
        "Good performance, suitable for most cases"
    } else if score >= 40.0 {
        "Moderate performance, consider optimization"
    } else {
        "Low efficiency, increase frames or review reference pattern"
    };
    format!("{} - {verdict} ({score:.1}/100)", best.algorithm)
}
