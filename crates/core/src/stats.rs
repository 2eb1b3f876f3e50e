//! Memory access timing model.
//!
//! This module accumulates the cost of every simulated reference. Each
//! reference takes one of three fixed-cost paths:
//! 1. **TLB hit:** TLB lookup + memory access.
//! 2. **TLB miss, page resident:** TLB lookup + page-table walk + memory access.
//! 3. **Page fault:** TLB lookup + page-table walk + disk transfer + memory access.
//!
//! Costs come from [`TimingConfig`] and are expressed in nanoseconds.
//! Counters only ever increase until [`PerformanceMetrics::reset`].

use serde::{Deserialize, Serialize};

use crate::config::TimingConfig;

/// Totals reported at the end of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBreakdown {
    /// Total simulated time in nanoseconds.
    pub total_time_ns: u64,
    /// Total simulated time in milliseconds.
    pub total_time_ms: f64,
    /// TLB lookups performed.
    pub tlb_accesses: u64,
    /// Page-table walks performed.
    pub page_table_accesses: u64,
    /// Disk transfers (page faults serviced).
    pub disk_accesses: u64,
    /// Main-memory accesses performed.
    pub memory_accesses: u64,
}

/// Access-path timing accumulator.
#[derive(Clone, Debug, Default)]
pub struct PerformanceMetrics {
    timing: TimingConfig,
    /// Total simulated time in nanoseconds.
    total_time_ns: u64,
    tlb_accesses: u64,
    page_table_accesses: u64,
    memory_accesses: u64,
    disk_accesses: u64,
    /// References recorded, one per path event.
    references: u64,
}

impl PerformanceMetrics {
    /// Creates an accumulator using the given cost model.
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Records a reference served by the TLB.
    pub const fn record_tlb_hit(&mut self) {
        self.references += 1;
        self.tlb_accesses += 1;
        self.memory_accesses += 1;
        self.total_time_ns += self.timing.tlb_access_ns + self.timing.memory_access_ns;
    }

    /// Records a TLB miss for a resident page.
    pub const fn record_memory_hit(&mut self) {
        self.references += 1;
        self.tlb_accesses += 1;
        self.page_table_accesses += 1;
        self.memory_accesses += 1;
        self.total_time_ns += self.timing.tlb_access_ns
            + self.timing.page_table_access_ns
            + self.timing.memory_access_ns;
    }

    /// Records a page fault.
    pub const fn record_page_fault(&mut self) {
        self.references += 1;
        self.tlb_accesses += 1;
        self.page_table_accesses += 1;
        self.disk_accesses += 1;
        self.memory_accesses += 1;
        self.total_time_ns += self.timing.tlb_access_ns
            + self.timing.page_table_access_ns
            + self.timing.disk_access_ns
            + self.timing.memory_access_ns;
    }

    /// Total simulated time in nanoseconds.
    pub const fn total_time_ns(&self) -> u64 {
        self.total_time_ns
    }

    /// References recorded so far.
    pub const fn references(&self) -> u64 {
        self.references
    }

    /// Mean cost per recorded reference in nanoseconds, or 0 with none.
    pub fn average_access_time(&self) -> f64 {
        if self.references == 0 {
            return 0.0;
        }
        self.total_time_ns as f64 / self.references as f64
    }

    /// Totals for reporting.
    pub fn breakdown(&self) -> PerformanceBreakdown {
        PerformanceBreakdown {
            total_time_ns: self.total_time_ns,
            total_time_ms: self.total_time_ns as f64 / 1_000_000.0,
            tlb_accesses: self.tlb_accesses,
            page_table_accesses: self.page_table_accesses,
            disk_accesses: self.disk_accesses,
            memory_accesses: self.memory_accesses,
        }
    }

    /// Zeroes every counter, keeping the cost model.
    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }
}
