//! Cache Statistics Module
//!
//! Counters observed on the read path and the reaper. Purely
//! informational: no operation's behavior depends on them.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads that returned a live value
    pub hits: u64,
    /// Number of reads that found nothing (absent or lazily expired)
    pub misses: u64,
    /// Number of expired entries physically removed by the reaper
    pub reaped: u64,
    /// Number of physically present entries, expired-but-unswept included
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
