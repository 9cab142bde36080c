//! Cache Statistics Module
//!
//! Tracks coordinator performance metrics including hits, misses, coalesced
//! waiters and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks request coordinator performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests served straight from the cache
    pub hits: u64,
    /// Requests that started a new fetch
    pub misses: u64,
    /// Requests that joined a fetch already in flight
    pub coalesced: u64,
    /// Fetches that settled with an error
    pub failures: u64,
    /// Entries evicted due to capacity pressure
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Fetches currently in flight
    pub in_flight: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Coalesced requests count as neither hits nor misses. Returns
    /// hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
