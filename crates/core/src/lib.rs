//! Virtual-memory page replacement simulator library.
//!
//! This crate replays a page reference string against a fixed number of
//! physical frames and reports how each replacement algorithm behaves:
//! 1. **Policies:** FIFO, LRU, LFU, Optimal (Belady) and Clock.
//! 2. **Translation:** An LRU TLB in front of the policy, kept coherent with evictions.
//! 3. **Analysis:** Working-set tracking with thrashing detection and a fixed-cost timing model.
//! 4. **Prediction:** A pattern predictor driving prefetches into any policy.
//! 5. **Simulation:** Single runs, algorithm comparisons, rankings and benchmark workloads.

/// Common types (page numbers, frame indices, errors).
pub mod common;
/// Simulator configuration (defaults, algorithm selection, per-unit settings).
pub mod config;
/// Simulation driver, result bundles, comparisons and reports.
pub mod sim;
/// Access-path timing model.
pub mod stats;
/// Simulated units (replacement policies, TLB, working-set tracker, prefetch).
pub mod units;
/// Benchmark workloads and reference string generators.
pub mod workloads;

/// Library error type; every fallible constructor returns it.
pub use crate::common::{Page, Result, SimError};
/// Algorithm selector and root configuration; use `SimConfig::new` or `SimConfig::from_json`.
pub use crate::config::{Algorithm, SimConfig};
/// Simulation driver and its result bundle.
pub use crate::sim::{SimulationResult, Simulator};
/// Policy trait implemented by every replacement algorithm.
pub use crate::units::policies::ReplacementPolicy;
