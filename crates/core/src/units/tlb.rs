//! Translation Lookaside Buffer (TLB).
//!
//! A small fully associative cache of page-to-frame mappings that sits in
//! front of the replacement policy. Entries are kept in recency order (least
//! recently used first); inserting into a full TLB evicts the front entry.
//!
//! The TLB only ever caches pages that are resident: the simulator calls
//! [`Tlb::invalidate`] for every page the policy evicts.

use serde::{Deserialize, Serialize};

use crate::common::{FrameIndex, Page};

/// A single cached translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TlbEntry {
    page: Page,
    frame: FrameIndex,
}

/// Snapshot of TLB counters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TlbStats {
    /// Lookups that found a mapping.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// `hits / (hits + misses)`, or 0 before any lookup.
    pub hit_ratio: f64,
    /// Entries currently cached.
    pub size: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

/// Translation Lookaside Buffer structure.
#[derive(Clone, Debug)]
pub struct Tlb {
    /// Entries ordered from least to most recently used.
    entries: Vec<TlbEntry>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Tlb {
    /// Creates an empty TLB.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of cached mappings.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "TLB needs at least one entry");
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    fn position(&self, page: Page) -> Option<usize> {
        self.entries.iter().position(|e| e.page == page)
    }

    /// Looks up a page in the TLB.
    ///
    /// A hit promotes the entry to most recently used; a miss is counted.
    ///
    /// # Returns
    ///
    /// `Some(frame)` if the page is cached, otherwise `None`.
    pub fn lookup(&mut self, page: Page) -> Option<FrameIndex> {
        let Some(idx) = self.position(page) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;
        let entry = self.entries.remove(idx);
        self.entries.push(entry);
        Some(entry.frame)
    }

    /// Inserts or refreshes the mapping for `page`.
    ///
    /// A new page inserted into a full TLB first evicts the least recently
    /// used entry. An existing page has its frame updated and becomes most
    /// recently used.
    pub fn update(&mut self, page: Page, frame: FrameIndex) {
        if let Some(idx) = self.position(page) {
            let _ = self.entries.remove(idx);
        } else if self.entries.len() >= self.capacity {
            let _ = self.entries.remove(0);
        }
        self.entries.push(TlbEntry { page, frame });
    }

    /// Removes the mapping for `page`, if cached.
    pub fn invalidate(&mut self, page: Page) {
        self.entries.retain(|e| e.page != page);
    }

    /// Returns `true` if `page` has a cached mapping. Does not count as a lookup.
    pub fn contains(&self, page: Page) -> bool {
        self.position(page).is_some()
    }

    /// Cached pages, least recently used first.
    pub fn pages(&self) -> Vec<Page> {
        self.entries.iter().map(|e| e.page).collect()
    }

    /// Number of cached mappings.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no mappings are cached.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached mappings.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups that hit.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that missed.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Fraction of lookups that hit, or 0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> TlbStats {
        TlbStats {
            hits: self.hits,
            misses: self.misses,
            hit_ratio: self.hit_ratio(),
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }

    /// Flushes all entries and zeroes the counters.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
