//! Working-set and thrashing detection.
//!
//! The tracker keeps the last `window_size` references together with whether
//! each one faulted. The working set is the number of distinct pages in that
//! window; the system is considered to be thrashing once the window is full
//! and the share of faulting references in it reaches the threshold.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::common::Page;
use crate::config::WorkingSetConfig;

/// Snapshot of the tracker's derived state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkingSetStats {
    /// Distinct pages in the current window.
    pub current_working_set: usize,
    /// Share of faulting references in the current window.
    pub fault_rate: f64,
    /// Whether the full window is at or above the thrashing threshold.
    pub is_thrashing: bool,
    /// Working-set size after every recorded reference.
    pub working_set_history: Vec<usize>,
}

/// Sliding-window working-set tracker.
#[derive(Clone, Debug)]
pub struct WorkingSetTracker {
    window_size: usize,
    threshold: f64,
    window: VecDeque<(Page, bool)>,
    distinct: usize,
    faults: usize,
    history: Vec<usize>,
}

impl WorkingSetTracker {
    /// Creates a tracker over `window_size` references that reports thrashing
    /// at a fault rate of `threshold` or more.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    pub fn new(window_size: usize, threshold: f64) -> Self {
        assert!(window_size > 0, "working-set window must hold at least one access");
        Self {
            window_size,
            threshold,
            window: VecDeque::with_capacity(window_size + 1),
            distinct: 0,
            faults: 0,
            history: Vec::new(),
        }
    }

    /// Creates a tracker from a validated config.
    pub fn from_config(config: &WorkingSetConfig) -> Self {
        Self::new(config.window_size, config.thrashing_threshold)
    }

    /// Records one reference and whether it faulted.
    pub fn record(&mut self, page: Page, is_fault: bool) {
        self.window.push_back((page, is_fault));
        if self.window.len() > self.window_size {
            let _ = self.window.pop_front();
        }
        self.distinct = self
            .window
            .iter()
            .map(|&(p, _)| p)
            .collect::<HashSet<_>>()
            .len();
        self.faults = self.window.iter().filter(|&&(_, fault)| fault).count();
        self.history.push(self.distinct);
    }

    /// Distinct pages referenced in the current window.
    pub const fn working_set_size(&self) -> usize {
        self.distinct
    }

    /// Share of faulting references in the window, or 0 when empty.
    pub fn fault_rate(&self) -> f64 {
        if self.window.is_empty() {
            0.0
        } else {
            self.faults as f64 / self.window.len() as f64
        }
    }

    /// Returns `true` once the window is full and its fault rate is at or
    /// above the threshold.
    pub fn is_thrashing(&self) -> bool {
        if self.window.len() < self.window_size {
            return false;
        }
        self.faults as f64 / self.window_size as f64 >= self.threshold
    }

    /// Working-set size after every recorded reference.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Configured window length.
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Snapshot of the derived state.
    pub fn stats(&self) -> WorkingSetStats {
        WorkingSetStats {
            current_working_set: self.distinct,
            fault_rate: self.fault_rate(),
            is_thrashing: self.is_thrashing(),
            working_set_history: self.history.clone(),
        }
    }

    /// Clears the window and history.
    pub fn reset(&mut self) {
        self.window.clear();
        self.distinct = 0;
        self.faults = 0;
        self.history.clear();
    }
}

impl Default for WorkingSetTracker {
    fn default() -> Self {
        Self::from_config(&WorkingSetConfig::default())
    }
}
