//! Simulator: owns the policy, TLB, working-set tracker and timing model
//! for one run.
//!
//! Each reference is processed in a single forward pass:
//! 1. With the TLB enabled, a TLB hit is counted against the policy's hit
//!    counter without reaching the policy. A miss goes to the policy; every
//!    page that left the frame set is invalidated in the TLB and the accessed
//!    page, if resident, is mapped to its frame index.
//! 2. With the TLB disabled, the reference goes straight to the policy.
//! 3. The working-set tracker and history are updated either way.

use tracing::{debug, trace, warn};

use super::result::{SimulationResult, StepRecord};
use crate::common::{Page, Result, SimError};
use crate::config::SimConfig;
use crate::stats::PerformanceMetrics;
use crate::units::policies::{self, ReplacementPolicy};
use crate::units::prefetch::PredictivePrefetcher;
use crate::units::tlb::Tlb;
use crate::units::working_set::WorkingSetTracker;

/// Top-level simulator for one reference string.
#[derive(Debug)]
pub struct Simulator {
    reference: Vec<Page>,
    policy: Box<dyn ReplacementPolicy>,
    tlb: Option<Tlb>,
    tracker: WorkingSetTracker,
    metrics: PerformanceMetrics,
    history: Vec<StepRecord>,
    thrashing_reported: bool,
}

impl Simulator {
    /// Creates a simulator for `reference` using the policy selected by `config`.
    ///
    /// When `config.predictor.enabled` is set, the policy is wrapped in a
    /// [`PredictivePrefetcher`].
    ///
    /// # Errors
    ///
    /// Returns the [`SimConfig::validate`] error for invalid parameters, or
    /// [`SimError::EmptyReferenceString`] for an empty reference string.
    pub fn new(config: &SimConfig, reference: Vec<Page>) -> Result<Self> {
        config.validate()?;
        let base = policies::build(config.algorithm, config.frames, &reference);
        let policy: Box<dyn ReplacementPolicy> = if config.predictor.enabled {
            Box::new(PredictivePrefetcher::with_config(base, config.predictor))
        } else {
            base
        };
        Self::with_policy(config, reference, policy)
    }

    /// Creates a simulator around a caller-built policy.
    ///
    /// `config.algorithm`, `config.frames` and `config.predictor` are ignored;
    /// the TLB, working-set and timing settings apply. The reference string is
    /// installed into the policy.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::new`].
    pub fn with_policy(
        config: &SimConfig,
        reference: Vec<Page>,
        mut policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self> {
        config.validate()?;
        if reference.is_empty() {
            return Err(SimError::EmptyReferenceString);
        }
        policy.set_reference_string(&reference);

        debug!(
            algorithm = %policy.name(),
            frames = policy.capacity(),
            references = reference.len(),
            tlb = config.tlb.enabled,
            "simulator created"
        );

        Ok(Self {
            tlb: config.tlb.enabled.then(|| Tlb::new(config.tlb.capacity)),
            tracker: WorkingSetTracker::from_config(&config.working_set),
            metrics: PerformanceMetrics::new(config.timing),
            history: Vec::with_capacity(reference.len()),
            thrashing_reported: false,
            reference,
            policy,
        })
    }

    /// Processes the next reference.
    ///
    /// # Returns
    ///
    /// The record for the processed step, or `None` once the reference string
    /// is exhausted.
    pub fn step(&mut self) -> Option<&StepRecord> {
        let index = self.history.len();
        let page = *self.reference.get(index)?;

        let (fault, tlb_hit) = if let Some(tlb) = self.tlb.as_mut() {
            if tlb.lookup(page).is_some() {
                self.policy.record_hit();
                self.metrics.record_tlb_hit();
                (false, Some(true))
            } else {
                let fault = Self::access_through_tlb(&mut *self.policy, tlb, page);
                (fault, Some(false))
            }
        } else {
            (self.policy.access(page), None)
        };
        if tlb_hit != Some(true) {
            if fault {
                self.metrics.record_page_fault();
            } else {
                self.metrics.record_memory_hit();
            }
        }

        self.tracker.record(page, fault);
        if !self.thrashing_reported && self.tracker.is_thrashing() {
            self.thrashing_reported = true;
            warn!(
                step = index + 1,
                fault_rate = self.tracker.fault_rate(),
                working_set = self.tracker.working_set_size(),
                "thrashing detected"
            );
        }
        trace!(step = index + 1, page, fault, ?tlb_hit, "reference");

        self.history.push(StepRecord {
            step: index + 1,
            page,
            frames: self.policy.frames(),
            page_fault: fault,
            tlb_hit,
            working_set_size: self.tracker.working_set_size(),
        });
        self.history.last()
    }

    /// Sends a TLB miss to the policy and brings the TLB back in line with
    /// the resulting frame set.
    fn access_through_tlb(policy: &mut dyn ReplacementPolicy, tlb: &mut Tlb, page: Page) -> bool {
        let before = policy.frames();
        let fault = policy.access(page);
        let after = policy.frames();

        for evicted in before.iter().filter(|p| !after.contains(p)) {
            tlb.invalidate(*evicted);
        }
        if let Some(frame) = after.iter().position(|&p| p == page) {
            tlb.update(page, frame);
        }
        fault
    }

    /// Replays every remaining reference and returns the result bundle.
    pub fn run(mut self) -> SimulationResult {
        while self.step().is_some() {}
        self.finish()
    }

    /// Builds the result bundle from the references processed so far.
    pub fn finish(self) -> SimulationResult {
        let total = self.history.len();
        let ratio = |count: u64| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };
        let page_faults = self.policy.page_faults();
        let hits = self.policy.hits();

        debug!(
            algorithm = %self.policy.name(),
            references = total,
            page_faults,
            hits,
            "simulation finished"
        );

        SimulationResult {
            algorithm: self.policy.name(),
            frames: self.policy.capacity(),
            page_faults,
            hits,
            hit_ratio: ratio(hits),
            fault_ratio: ratio(page_faults),
            tlb_stats: self.tlb.as_ref().map(Tlb::stats),
            working_set_stats: self.tracker.stats(),
            performance: self.metrics.breakdown(),
            average_access_time: self.metrics.average_access_time(),
            prediction_stats: self.policy.prediction_stats(),
            history: self.history,
        }
    }

    /// Returns `true` once every reference has been processed.
    pub const fn is_finished(&self) -> bool {
        self.history.len() >= self.reference.len()
    }

    /// The reference string being replayed.
    pub fn reference(&self) -> &[Page] {
        &self.reference
    }

    /// The policy being driven.
    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }

    /// The TLB, when enabled.
    pub const fn tlb(&self) -> Option<&Tlb> {
        self.tlb.as_ref()
    }

    /// The working-set tracker.
    pub const fn tracker(&self) -> &WorkingSetTracker {
        &self.tracker
    }

    /// The timing model.
    pub const fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Records of the steps processed so far.
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }
}
