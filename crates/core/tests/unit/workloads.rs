//! Workload and Generator Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pagesim_core::SimError;
use pagesim_core::workloads::{
    self, Locality, XorShift, generator, parse_reference_string, workload_stats,
};

// ══════════════════════════════════════════════════════════
// 1. Benchmarks
// ══════════════════════════════════════════════════════════

#[test]
fn eight_benchmarks_in_order() {
    let names: Vec<&str> = workloads::all().iter().map(|w| w.name).collect();
    assert_eq!(
        names,
        vec![
            "Sequential",
            "Loop",
            "Random",
            "Locality Burst",
            "Web Browsing",
            "Video Streaming",
            "Database",
            "Matrix Ops"
        ]
    );
}

#[rstest]
#[case("Sequential", 30, Locality::High)]
#[case("Loop", 20, Locality::High)]
#[case("Random", 40, Locality::Low)]
#[case("Locality Burst", 128, Locality::Medium)]
#[case("Web Browsing", 21, Locality::Medium)]
#[case("Video Streaming", 55, Locality::High)]
#[case("Database", 23, Locality::Medium)]
#[case("Matrix Ops", 48, Locality::Medium)]
fn benchmark_shapes(#[case] name: &str, #[case] len: usize, #[case] category: Locality) {
    let workload = workloads::find(name).unwrap();
    assert_eq!(workload.pages.len(), len);
    assert_eq!(workload.category, category);
    assert!(!workload.description.is_empty());
}

#[test]
fn find_ignores_case() {
    assert_eq!(workloads::find("web browsing").unwrap().name, "Web Browsing");
    assert!(workloads::find("nope").is_none());
}

#[test]
fn video_streaming_seeks() {
    let stream = workloads::video_streaming();
    assert_eq!(&stream[..20], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 5, 6, 7, 8, 16]);
    assert_eq!(&stream[30..33], &[20, 21, 22]);
    assert_eq!(&stream[40..44], &[35, 36, 37, 38]);
}

#[test]
fn database_pattern() {
    assert_eq!(
        workloads::database(),
        vec![0, 1, 2, 0, 3, 4, 0, 5, 6, 0, 7, 8, 0, 9, 10, 0, 3, 5, 7, 0, 2, 4, 6]
    );
}

#[test]
fn matrix_pattern() {
    let pages = workloads::matrix(4);
    assert_eq!(&pages[..6], &[0, 4, 8, 0, 5, 9]);
    assert_eq!(workload_stats(&pages).unique_pages, 24);
}

#[test]
fn locality_burst_pattern() {
    let pages = workloads::locality_burst(&[1, 2, 3], &[4, 5, 6, 7], 2);
    assert_eq!(pages.len(), 32);
    assert_eq!(&pages[12..16], &[4, 5, 6, 7]);
}

#[test]
fn random_benchmark_is_reproducible() {
    let a = workloads::random_access(10, 40, 42);
    let b = workloads::random_access(10, 40, 42);
    assert_eq!(a, b);
    assert!(a.iter().all(|&p| p < 10));
    assert_ne!(a, workloads::random_access(10, 40, 7));
}

#[test]
fn stats_of_workload() {
    let stats = workload_stats(&[1, 2, 1, 3]);
    assert_eq!(stats.length, 4);
    assert_eq!(stats.unique_pages, 3);
    assert_eq!(stats.working_set_ratio, 0.75);
    assert_eq!(workload_stats(&[]).working_set_ratio, 0.0);
}

#[test]
fn locality_labels() {
    assert_eq!(Locality::High.to_string(), "High Locality");
    assert_eq!(Locality::Medium.to_string(), "Medium Locality");
    assert_eq!(Locality::Low.to_string(), "Low Locality");
}

// ══════════════════════════════════════════════════════════
// 2. Generators
// ══════════════════════════════════════════════════════════

#[test]
fn xorshift_zero_seed_is_usable() {
    let mut zero = XorShift::new(0);
    assert_eq!(zero, XorShift::default());
    assert_ne!(zero.next_u64(), 0);
}

#[test]
fn below_stays_in_range() {
    let mut rng = XorShift::new(99);
    assert!((0..1000).all(|_| rng.below(7) < 7));
    assert_eq!(rng.below(0), 0);
}

#[test]
fn sequential_wraps() {
    assert_eq!(generator::sequential(7, 3), vec![0, 1, 2, 0, 1, 2, 0]);
    assert_eq!(generator::sequential(3, 0), vec![0, 0, 0]);
}

#[test]
fn random_respects_range() {
    let mut rng = XorShift::new(5);
    let pages = generator::random(200, 16, &mut rng);
    assert_eq!(pages.len(), 200);
    assert!(pages.iter().all(|&p| p < 16));
}

#[test]
fn locality_stays_within_hot_set_per_phase() {
    let mut rng = XorShift::new(11);
    let pages = generator::with_locality(100, 50, 5, &mut rng);
    assert_eq!(pages.len(), 100);
    for phase in pages.chunks(20) {
        assert!(workload_stats(phase).unique_pages <= 5);
        assert!(phase.iter().all(|&p| p < 50));
    }
}

#[test]
fn locality_larger_than_range() {
    let mut rng = XorShift::new(3);
    let pages = generator::with_locality(40, 3, 10, &mut rng);
    assert!(pages.iter().all(|&p| p < 3));
}

// ══════════════════════════════════════════════════════════
// 3. Parsing
// ══════════════════════════════════════════════════════════

#[test]
fn parses_comma_separated() {
    assert_eq!(parse_reference_string("7, 0, 1,2").unwrap(), vec![7, 0, 1, 2]);
    assert_eq!(parse_reference_string(" 3 ,, 4 , ").unwrap(), vec![3, 4]);
}

#[test]
fn rejects_empty_input() {
    assert_eq!(parse_reference_string("").unwrap_err(), SimError::EmptyReferenceString);
    assert_eq!(parse_reference_string(" , ,").unwrap_err(), SimError::EmptyReferenceString);
}

#[rstest]
#[case("1, x, 3", "x")]
#[case("1, -2", "-2")]
#[case("1.5", "1.5")]
fn rejects_bad_tokens(#[case] text: &str, #[case] bad: &str) {
    match parse_reference_string(text) {
        Err(SimError::ParsePage { token, .. }) => assert_eq!(token, bad),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
