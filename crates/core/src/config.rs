//! Configuration system for the page-replacement simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (TLB size, working-set window, predictor tuning, access costs).
//! 2. **Structures:** Nested config for the TLB, working-set tracker, predictor and timing model.
//! 3. **Enums:** The replacement algorithm selection.
//!
//! Configuration is deserialized from JSON (the CLI's `--config` file) or built with
//! `SimConfig::default()`; [`SimConfig::validate`] rejects invalid parameters before a
//! simulator is constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Resident frame count.
    pub const FRAMES: usize = 3;

    /// Translation Lookaside Buffer entry count.
    pub const TLB_CAPACITY: usize = 4;

    /// Number of trailing accesses considered by the working-set tracker.
    pub const WORKING_SET_WINDOW: usize = 10;

    /// Fault rate at or above which a full window counts as thrashing.
    pub const THRASHING_THRESHOLD: f64 = 0.7;

    /// Accesses retained by the predictor's history.
    pub const HISTORY_WINDOW: usize = 10;

    /// Length of the page sequence used as a prediction key.
    pub const PATTERN_DEPTH: usize = 3;

    /// Confidence a prediction must exceed before a prefetch is issued.
    pub const INITIAL_THRESHOLD: f64 = 0.5;

    /// Lower bound of the adaptive confidence threshold.
    pub const MIN_THRESHOLD: f64 = 0.3;

    /// Upper bound of the adaptive confidence threshold.
    pub const MAX_THRESHOLD: f64 = 0.7;

    /// Threshold adjustment applied per verified prediction.
    pub const THRESHOLD_STEP: f64 = 0.05;

    /// Number of verified predictions in the rolling accuracy window.
    pub const ACCURACY_WINDOW: usize = 20;

    /// Samples required before the threshold starts adapting.
    pub const MIN_ACCURACY_SAMPLES: usize = 10;

    /// Rolling accuracy below which the threshold is raised.
    pub const RAISE_BELOW: f64 = 0.5;

    /// Rolling accuracy above which the threshold is lowered.
    pub const LOWER_ABOVE: f64 = 0.8;

    /// TLB lookup cost in nanoseconds.
    pub const TLB_ACCESS_NS: u64 = 2;

    /// Page-table walk cost in nanoseconds.
    pub const PAGE_TABLE_ACCESS_NS: u64 = 100;

    /// Main-memory access cost in nanoseconds.
    pub const MEMORY_ACCESS_NS: u64 = 100;

    /// Disk transfer cost (page fault service) in nanoseconds.
    pub const DISK_ACCESS_NS: u64 = 10_000_000;
}

/// Page replacement algorithms.
///
/// Specifies the rule used to select which resident page to evict when a
/// faulting page must be admitted into a full frame set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// First In First Out.
    ///
    /// Evicts the page that was admitted earliest.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used.
    ///
    /// Evicts the page whose last access is oldest.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Least Frequently Used.
    ///
    /// Evicts the page with the fewest accesses, oldest admission first on ties.
    #[serde(alias = "Lfu", alias = "lfu")]
    Lfu,
    /// Belady's optimal algorithm.
    ///
    /// Evicts the page whose next use lies farthest ahead in the reference string.
    #[serde(alias = "Optimal", alias = "optimal", alias = "OPT")]
    Optimal,
    /// Second-chance clock.
    ///
    /// Sweeps a circular hand, clearing use bits until an unused page is found.
    #[serde(alias = "Clock", alias = "clock")]
    Clock,
}

impl Algorithm {
    /// Every algorithm, in the order comparisons report them.
    pub const ALL: [Self; 5] = [Self::Fifo, Self::Lru, Self::Lfu, Self::Optimal, Self::Clock];

    /// Display name used in results and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
            Self::Optimal => "Optimal",
            Self::Clock => "Clock",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    /// Parses an algorithm name case-insensitively (`"lru"`, `"Optimal"`, `"OPT"`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lru" => Ok(Self::Lru),
            "lfu" => Ok(Self::Lfu),
            "optimal" | "opt" => Ok(Self::Optimal),
            "clock" => Ok(Self::Clock),
            _ => Err(SimError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pagesim_core::config::{Algorithm, SimConfig};
///
/// let config = SimConfig::default();
/// assert_eq!(config.frames, 3);
/// assert_eq!(config.algorithm, Algorithm::Lru);
/// assert!(config.tlb.enabled);
/// ```
///
/// Deserializing from JSON; omitted sections keep their defaults:
///
/// ```
/// use pagesim_core::config::{Algorithm, SimConfig};
///
/// let json = r#"{
///     "frames": 4,
///     "algorithm": "Clock",
///     "tlb": { "enabled": false },
///     "predictor": { "enabled": true, "pattern_depth": 2 }
/// }"#;
///
/// let config = SimConfig::from_json(json).unwrap();
/// assert_eq!(config.frames, 4);
/// assert_eq!(config.algorithm, Algorithm::Clock);
/// assert!(!config.tlb.enabled);
/// assert_eq!(config.tlb.capacity, 4);
/// assert_eq!(config.predictor.pattern_depth, 2);
/// assert_eq!(config.working_set.window_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of resident frames.
    pub frames: usize,
    /// Replacement algorithm.
    pub algorithm: Algorithm,
    /// Translation cache settings.
    pub tlb: TlbConfig,
    /// Working-set and thrashing detector settings.
    pub working_set: WorkingSetConfig,
    /// Predictive prefetch settings.
    pub predictor: PredictorConfig,
    /// Access cost model.
    pub timing: TimingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: defaults::FRAMES,
            algorithm: Algorithm::default(),
            tlb: TlbConfig::default(),
            working_set: WorkingSetConfig::default(),
            predictor: PredictorConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Creates a configuration for `algorithm` over `frames` frames with every
    /// other setting at its default.
    pub fn new(algorithm: Algorithm, frames: usize) -> Self {
        Self {
            frames,
            algorithm,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// The result is validated, so a successfully parsed config can be handed
    /// straight to [`Simulator::new`](crate::sim::Simulator::new).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the text is not valid JSON for this
    /// schema, or the [`validate`](Self::validate) error otherwise.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidFrameCount`] for zero frames.
    /// - [`SimError::InvalidTlbCapacity`] for an enabled TLB with zero entries.
    /// - [`SimError::InvalidWindow`] / [`SimError::InvalidThreshold`] for a bad working-set setup.
    /// - [`SimError::InvalidPatternDepth`] / [`SimError::InvalidThreshold`] for a bad predictor setup
    ///   (checked only when the predictor is enabled).
    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 {
            return Err(SimError::InvalidFrameCount(self.frames));
        }
        if self.tlb.enabled && self.tlb.capacity == 0 {
            return Err(SimError::InvalidTlbCapacity(self.tlb.capacity));
        }
        self.working_set.validate()?;
        if self.predictor.enabled {
            self.predictor.validate()?;
        }
        Ok(())
    }
}

/// Returns `ratio` unchanged if it is a finite value in `[0, 1]`.
fn check_ratio(ratio: f64) -> Result<f64> {
    if ratio.is_finite() && (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(SimError::InvalidThreshold(ratio))
    }
}

/// Translation Lookaside Buffer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlbConfig {
    /// Route accesses through the TLB before consulting the policy.
    pub enabled: bool,
    /// Maximum number of cached page-to-frame mappings.
    pub capacity: usize,
}

impl Default for TlbConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: defaults::TLB_CAPACITY,
        }
    }
}

/// Working-set tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingSetConfig {
    /// Trailing accesses in the sliding window.
    pub window_size: usize,
    /// Fault rate at or above which a full window reports thrashing.
    pub thrashing_threshold: f64,
}

impl WorkingSetConfig {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SimError::InvalidWindow(self.window_size));
        }
        let _ = check_ratio(self.thrashing_threshold)?;
        Ok(())
    }
}

impl Default for WorkingSetConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WORKING_SET_WINDOW,
            thrashing_threshold: defaults::THRASHING_THRESHOLD,
        }
    }
}

/// Predictive prefetcher configuration.
///
/// The threshold fields describe the adaptive confidence gate: once
/// `min_accuracy_samples` verified predictions exist, a rolling accuracy above
/// `lower_above` lowers the gate by `threshold_step` (down to `min_threshold`)
/// and one below `raise_below` raises it (up to `max_threshold`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Wrap the selected policy in a predictive prefetcher.
    pub enabled: bool,
    /// Accesses retained in the predictor's history.
    pub history_window: usize,
    /// Length of the page sequence used as a prediction key.
    pub pattern_depth: usize,
    /// Starting confidence threshold.
    pub initial_threshold: f64,
    /// Floor of the adaptive threshold.
    pub min_threshold: f64,
    /// Ceiling of the adaptive threshold.
    pub max_threshold: f64,
    /// Adjustment applied on each adaptation.
    pub threshold_step: f64,
    /// Verified predictions kept for the rolling accuracy.
    pub accuracy_window: usize,
    /// Verified predictions required before adapting.
    pub min_accuracy_samples: usize,
    /// Rolling accuracy below which the threshold rises.
    pub raise_below: f64,
    /// Rolling accuracy above which the threshold falls.
    pub lower_above: f64,
}

impl PredictorConfig {
    fn validate(&self) -> Result<()> {
        if self.pattern_depth == 0 || self.pattern_depth > self.history_window {
            return Err(SimError::InvalidPatternDepth {
                depth: self.pattern_depth,
                window: self.history_window,
            });
        }
        if self.accuracy_window == 0 {
            return Err(SimError::InvalidWindow(self.accuracy_window));
        }
        if self.min_accuracy_samples > self.accuracy_window {
            return Err(SimError::InvalidAccuracySamples {
                samples: self.min_accuracy_samples,
                window: self.accuracy_window,
            });
        }
        for ratio in [
            self.initial_threshold,
            self.min_threshold,
            self.max_threshold,
            self.threshold_step,
            self.raise_below,
            self.lower_above,
        ] {
            let _ = check_ratio(ratio)?;
        }
        if self.min_threshold > self.max_threshold {
            return Err(SimError::InvalidThreshold(self.min_threshold));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            history_window: defaults::HISTORY_WINDOW,
            pattern_depth: defaults::PATTERN_DEPTH,
            initial_threshold: defaults::INITIAL_THRESHOLD,
            min_threshold: defaults::MIN_THRESHOLD,
            max_threshold: defaults::MAX_THRESHOLD,
            threshold_step: defaults::THRESHOLD_STEP,
            accuracy_window: defaults::ACCURACY_WINDOW,
            min_accuracy_samples: defaults::MIN_ACCURACY_SAMPLES,
            raise_below: defaults::RAISE_BELOW,
            lower_above: defaults::LOWER_ABOVE,
        }
    }
}

/// Fixed access-path costs, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// TLB lookup.
    pub tlb_access_ns: u64,
    /// Page-table walk.
    pub page_table_access_ns: u64,
    /// Main-memory access.
    pub memory_access_ns: u64,
    /// Disk transfer on a page fault.
    pub disk_access_ns: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tlb_access_ns: defaults::TLB_ACCESS_NS,
            page_table_access_ns: defaults::PAGE_TABLE_ACCESS_NS,
            memory_access_ns: defaults::MEMORY_ACCESS_NS,
            disk_access_ns: defaults::DISK_ACCESS_NS,
        }
    }
}
