//! Benchmark workloads.
//!
//! Named reference strings modelling common access patterns, grouped by how
//! much locality they exhibit, plus the generators in [`generator`].

/// Reference string generators and text parsing.
pub mod generator;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use generator::{XorShift, parse_reference_string};

use crate::common::Page;

/// Seed of the `Random` benchmark.
const RANDOM_SEED: u64 = 42;

/// How much reuse a workload exhibits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locality {
    /// Mostly reuse of a small set.
    High,
    /// A hot set mixed with colder pages.
    Medium,
    /// Little reuse.
    Low,
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High Locality",
            Self::Medium => "Medium Locality",
            Self::Low => "Low Locality",
        };
        f.pad(label)
    }
}

/// A named benchmark reference string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Workload {
    /// Short name, e.g. `"Web Browsing"`.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Locality category.
    pub category: Locality,
    /// The reference string.
    pub pages: Vec<Page>,
}

/// Shape of a reference string.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStats {
    /// Number of references.
    pub length: usize,
    /// Distinct pages referenced.
    pub unique_pages: usize,
    /// `unique_pages / length`, or 0 for an empty string.
    pub working_set_ratio: f64,
}

/// Computes [`WorkloadStats`] for `pages`.
pub fn workload_stats(pages: &[Page]) -> WorkloadStats {
    let unique_pages = pages.iter().collect::<HashSet<_>>().len();
    let working_set_ratio = if pages.is_empty() {
        0.0
    } else {
        unique_pages as f64 / pages.len() as f64
    };
    WorkloadStats {
        length: pages.len(),
        unique_pages,
        working_set_ratio,
    }
}

/// Every benchmark, in presentation order.
pub fn all() -> Vec<Workload> {
    let entry = |name, description, category, pages| Workload {
        name,
        description,
        category,
        pages,
    };
    vec![
        entry("Sequential", "Sequential file reading", Locality::High, sequential(0, 30)),
        entry("Loop", "Repeated loop execution", Locality::High, repeat(&[1, 2, 3, 4], 5)),
        entry("Random", "Random database queries", Locality::Low, random_access(10, 40, RANDOM_SEED)),
        entry(
            "Locality Burst",
            "Temporal locality (80/20)",
            Locality::Medium,
            locality_burst(&[1, 2, 3], &[4, 5, 6, 7], 8),
        ),
        entry("Web Browsing", "Browser tab switching", Locality::Medium, web_browsing()),
        entry("Video Streaming", "Video with seeks", Locality::High, video_streaming()),
        entry("Database", "Database index lookups", Locality::Medium, database()),
        entry("Matrix Ops", "Matrix multiplication", Locality::Medium, matrix(4)),
    ]
}

/// Looks up a benchmark by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<Workload> {
    all().into_iter().find(|w| w.name.eq_ignore_ascii_case(name))
}

/// `len` consecutive pages starting at `start`.
pub fn sequential(start: Page, len: usize) -> Vec<Page> {
    (start..start + len as Page).collect()
}

/// `pages` repeated `iterations` times.
pub fn repeat(pages: &[Page], iterations: usize) -> Vec<Page> {
    pages.repeat(iterations)
}

/// `accesses` pages drawn from `0..num_pages` with a seeded generator.
pub fn random_access(num_pages: u64, accesses: usize, seed: u64) -> Vec<Page> {
    generator::random(accesses, num_pages, &mut XorShift::new(seed))
}

/// `bursts` rounds of the hot set four times followed by the cold set once.
pub fn locality_burst(hot: &[Page], cold: &[Page], bursts: usize) -> Vec<Page> {
    let mut pages = Vec::with_capacity(bursts * (hot.len() * 4 + cold.len()));
    for _ in 0..bursts {
        pages.extend(hot.repeat(4));
        pages.extend_from_slice(cold);
    }
    pages
}

/// Tab switching around a core of three tabs.
pub fn web_browsing() -> Vec<Page> {
    vec![1, 2, 3, 1, 2, 4, 5, 1, 2, 3, 6, 7, 1, 2, 3, 4, 8, 9, 1, 2, 3]
}

/// Linear playback of pages 1..=44 with three backward seeks.
pub fn video_streaming() -> Vec<Page> {
    let seeks: [(usize, &[Page]); 3] = [(15, &[5, 6, 7, 8]), (30, &[20, 21, 22]), (40, &[35, 36, 37, 38])];
    let mut stream: Vec<Page> = (1..=44).collect();
    for (at, seek) in seeks {
        let tail = stream.split_off(at);
        stream.extend_from_slice(seek);
        stream.extend(tail);
    }
    stream
}

/// Index page 0 consulted before each pair of data pages.
pub fn database() -> Vec<Page> {
    let mut pages = Vec::new();
    for query in 0..5 {
        pages.extend([0, query * 2 + 1, query * 2 + 2]);
    }
    pages.extend([0, 3, 5, 7, 0, 2, 4, 6]);
    pages
}

/// Row, column and result pages of an `n x n` matrix product.
pub fn matrix(n: Page) -> Vec<Page> {
    let mut pages = Vec::new();
    for i in 0..n {
        for j in 0..n {
            pages.extend([i, n + j, 2 * n + i * n + j]);
        }
    }
    pages
}
