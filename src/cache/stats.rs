//! Cache Statistics Module
//!
//! Counters for hits, misses, evictions and TTL expirations.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for the cache engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful retrievals
    pub hits: u64,
    /// Failed retrievals (absent or expired key)
    pub misses: u64,
    /// Entries removed by the LRU capacity policy
    pub evictions: u64,
    /// Entries removed because their TTL elapsed (lazy reads and sweeps)
    pub expirations: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any request.
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

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: u64) {
        self.expirations += count;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
