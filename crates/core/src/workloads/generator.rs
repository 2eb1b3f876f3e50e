//! Reference string generators and parsing.
//!
//! Randomised generators take an explicit [`XorShift`] so that a seed fully
//! determines the output.

use crate::common::{Page, Result, SimError};

/// Seed used when a generator is created with a zero seed.
const DEFAULT_SEED: u64 = 123_456_789;

/// References between resamples of the hot set in [`with_locality`].
const LOCALITY_PHASE: usize = 20;

/// Xorshift64 pseudo-random generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// Creates a generator from `seed`. A zero seed is replaced by a fixed
    /// non-zero one, since xorshift never leaves the zero state.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Next raw 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..bound`. Returns 0 when `bound` is 0.
    pub const fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }

    /// Picks `count` distinct values from `0..range` (all of them when
    /// `count >= range`).
    fn sample(&mut self, range: u64, count: usize) -> Vec<Page> {
        let mut pool: Vec<Page> = (0..range).collect();
        let count = count.min(pool.len());
        // Partial Fisher-Yates.
        for i in 0..count {
            let j = i + self.below((pool.len() - i) as u64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

impl Default for XorShift {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// `len` pages drawn uniformly from `0..range`.
pub fn random(len: usize, range: u64, rng: &mut XorShift) -> Vec<Page> {
    (0..len).map(|_| rng.below(range)).collect()
}

/// `0, 1, .., range - 1, 0, 1, ..` truncated to `len` pages.
pub fn sequential(len: usize, range: u64) -> Vec<Page> {
    if range == 0 {
        return vec![0; len];
    }
    (0..len as u64).map(|i| i % range).collect()
}

/// `len` pages drawn from a hot set of `locality_size` distinct pages out of
/// `0..range`; the hot set is resampled every 20 references.
pub fn with_locality(len: usize, range: u64, locality_size: usize, rng: &mut XorShift) -> Vec<Page> {
    let mut hot = rng.sample(range, locality_size);
    let mut pages = Vec::with_capacity(len);
    for i in 0..len {
        if i > 0 && i % LOCALITY_PHASE == 0 {
            hot = rng.sample(range, locality_size);
        }
        if hot.is_empty() {
            pages.push(0);
        } else {
            let idx = rng.below(hot.len() as u64) as usize;
            pages.push(hot[idx]);
        }
    }
    pages
}

/// Parses comma-separated page numbers such as `"7, 0, 1"`.
///
/// Blank tokens are skipped.
///
/// # Errors
///
/// [`SimError::ParsePage`] for a token that is not an unsigned integer and
/// [`SimError::EmptyReferenceString`] when no page remains.
///
/// ```
/// use pagesim_core::workloads::parse_reference_string;
///
/// assert_eq!(parse_reference_string("7, 0,1,").unwrap(), vec![7, 0, 1]);
/// assert!(parse_reference_string(" , ").is_err());
/// ```
pub fn parse_reference_string(text: &str) -> Result<Vec<Page>> {
    let pages = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<Page>().map_err(|source| SimError::ParsePage {
                token: token.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if pages.is_empty() {
        return Err(SimError::EmptyReferenceString);
    }
    Ok(pages)
}
