//! Timing Model Tests.
//!
//! Checks the per-path costs and the derived totals against the default
//! timing configuration (TLB 2 ns, page table 100 ns, memory 100 ns,
//! disk 10 ms).

use pretty_assertions::assert_eq;

use pagesim_core::config::TimingConfig;
use pagesim_core::stats::PerformanceMetrics;

fn metrics() -> PerformanceMetrics {
    PerformanceMetrics::new(TimingConfig::default())
}

#[test]
fn tlb_hit_cost() {
    let mut m = metrics();
    m.record_tlb_hit();
    assert_eq!(m.total_time_ns(), 102);
    let b = m.breakdown();
    assert_eq!((b.tlb_accesses, b.page_table_accesses), (1, 0));
    assert_eq!((b.memory_accesses, b.disk_accesses), (1, 0));
}

#[test]
fn memory_hit_cost() {
    let mut m = metrics();
    m.record_memory_hit();
    assert_eq!(m.total_time_ns(), 202);
    assert_eq!(m.breakdown().page_table_accesses, 1);
}

#[test]
fn page_fault_cost() {
    let mut m = metrics();
    m.record_page_fault();
    assert_eq!(m.total_time_ns(), 10_000_202);
    let b = m.breakdown();
    assert_eq!(b.disk_accesses, 1);
    assert_eq!(b.total_time_ms, 10.000_202);
}

#[test]
fn average_over_references() {
    let mut m = metrics();
    assert_eq!(m.average_access_time(), 0.0);
    m.record_tlb_hit();
    m.record_memory_hit();
    assert_eq!(m.references(), 2);
    assert_eq!(m.average_access_time(), 152.0);
}

#[test]
fn custom_costs() {
    let timing = TimingConfig {
        tlb_access_ns: 1,
        page_table_access_ns: 10,
        memory_access_ns: 50,
        disk_access_ns: 1000,
    };
    let mut m = PerformanceMetrics::new(timing);
    m.record_page_fault();
    m.record_tlb_hit();
    assert_eq!(m.total_time_ns(), 1061 + 51);
}

#[test]
fn reset_keeps_cost_model() {
    let mut m = metrics();
    m.record_page_fault();
    m.reset();
    assert_eq!(m.total_time_ns(), 0);
    assert_eq!(m.references(), 0);
    m.record_tlb_hit();
    assert_eq!(m.total_time_ns(), 102);
}
