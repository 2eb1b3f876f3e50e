//! Simulation driver and result reporting.
//!
//! Provides the orchestrator that replays a reference string through a
//! policy, TLB, working-set tracker and timing model, along with the result
//! bundle it produces and helpers for comparing runs.

/// Multi-run comparisons: all algorithms, base vs. predictive, rankings.
pub mod compare;

/// Plain-text summary rendering of a result bundle.
pub mod report;

/// Result bundle and per-step history records.
pub mod result;

/// Reference-string orchestrator.
pub mod simulator;

pub use compare::{MlComparison, Ranking, compare_all, compare_ml, rank, recommendation};
pub use result::{SimulationResult, StepRecord};
pub use simulator::Simulator;
