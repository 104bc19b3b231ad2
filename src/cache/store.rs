//! Cache Store Module
//!
//! The storage core: a map of key to entry with lazy expiry on read.
//! Not concurrency-safe by itself; `Cache` wraps it in a lock and is the
//! only way to reach it from outside the crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::cache::{CacheStats, Entry};

// == Cache Store ==
/// Key-value storage with per-entry TTL.
#[derive(Debug)]
pub(crate) struct Store<V> {
    /// Key-value storage
    entries: HashMap<String, Entry<V>>,
    /// Read hits; atomic because the read path holds only a shared reference
    hits: AtomicU64,
    /// Read misses (absent or lazily expired)
    misses: AtomicU64,
    /// Entries physically removed by the reaper
    reaped: u64,
}

impl<V> Store<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reaped: 0,
        }
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL.
    ///
    /// Overwrites any existing entry under the key, resetting its expiry.
    /// A `None` or zero TTL stores the value forever.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        self.entries.insert(key, Entry::new(value, ttl));
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was present; deleting an absent key is a
    /// no-op, not an error.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Range ==
    /// Visits every live entry, in unspecified order.
    ///
    /// Expiry is judged against a single instant captured when the walk
    /// starts, so one pass applies one consistent notion of "now". Expired
    /// entries are skipped, never yielded. The visitor returns `false` to
    /// stop the walk early.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        let now = Instant::now();

        for (key, entry) in &self.entries {
            if entry.is_expired_at(now) {
                continue;
            }

            if !visit(key, &entry.value) {
                return;
            }
        }
    }

    // == Sweep Expired ==
    /// Physically removes every expired entry.
    ///
    /// Called by the reaper only. Reads never depend on this having run;
    /// it exists purely to reclaim memory.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.reaped += removed as u64;
        removed
    }

    // == Length ==
    /// Returns the number of physically present entries.
    ///
    /// Includes expired entries the reaper has not swept yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the store's counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reaped: self.reaped,
            total_entries: self.entries.len(),
        }
    }
}

impl<V: Clone> Store<V> {
    // == Get ==
    /// Retrieves the value for a key, if present and not expired.
    ///
    /// Lazy expiry: an entry whose TTL has passed reads as absent even if
    /// the reaper has not removed it yet. The read never mutates the map,
    /// so it only needs a shared reference.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => entry,
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(entry.value.clone())
    }

    /// Returns the remaining TTL for a live entry.
    ///
    /// `None` if the key is absent or expired; `Some(None)` if the entry
    /// never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(Entry::ttl_remaining)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_store_new() {
        let store: Store<String> = Store::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: Store<String> = Store::new();

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite_resets_value_and_ttl() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", Some(Duration::from_millis(10)));
        store.set("key1".to_string(), "value2", None);

        sleep(Duration::from_millis(30));

        // Overwrite replaced the short TTL with "never expires"
        assert_eq!(store.get("key1"), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", None);

        assert!(store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_noop() {
        let mut store: Store<String> = Store::new();

        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_lazy_expiry_on_get() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", Some(Duration::from_millis(20)));

        assert_eq!(store.get("key1"), Some("value1"));

        sleep(Duration::from_millis(40));

        // Expired entry reads as absent even though it was never swept
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 1, "lazy expiry must not remove the entry");
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", Some(Duration::ZERO));

        sleep(Duration::from_millis(20));

        assert_eq!(store.get("key1"), Some("value1"));
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = Store::new();

        store.set("gone".to_string(), "value1", Some(Duration::from_millis(10)));
        store.set("kept".to_string(), "value2", Some(Duration::from_secs(10)));
        store.set("forever".to_string(), "value3", None);

        sleep(Duration::from_millis(30));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("kept"), Some("value2"));
        assert_eq!(store.get("forever"), Some("value3"));
    }

    #[test]
    fn test_store_sweep_nothing_expired() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", None);

        assert_eq!(store.sweep_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_range_visits_live_entries() {
        let mut store = Store::new();

        store.set("a".to_string(), 1, None);
        store.set("b".to_string(), 2, None);

        let mut seen = Vec::new();
        store.range(|key, value| {
            seen.push((key.to_string(), *value));
            true
        });

        seen.sort();
        assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_store_range_skips_expired() {
        let mut store = Store::new();

        store.set("live".to_string(), 1, None);
        store.set("dead".to_string(), 2, Some(Duration::from_millis(10)));

        sleep(Duration::from_millis(30));

        let mut seen = Vec::new();
        store.range(|key, value| {
            seen.push((key.to_string(), *value));
            true
        });

        assert_eq!(seen, vec![("live".to_string(), 1)]);
    }

    #[test]
    fn test_store_range_early_stop() {
        let mut store = Store::new();

        store.set("a".to_string(), 1, None);
        store.set("b".to_string(), 2, None);
        store.set("c".to_string(), 3, None);

        let mut visited = 0;
        store.range(|_, _| {
            visited += 1;
            false
        });

        assert_eq!(visited, 1);
    }

    #[test]
    fn test_store_ttl_remaining() {
        let mut store = Store::new();

        store.set("timed".to_string(), 1, Some(Duration::from_secs(10)));
        store.set("forever".to_string(), 2, None);

        let remaining = store.ttl_remaining("timed").unwrap().unwrap();
        assert!(remaining <= Duration::from_secs(10));

        assert_eq!(store.ttl_remaining("forever"), Some(None));
        assert_eq!(store.ttl_remaining("absent"), None);
    }

    #[test]
    fn test_store_stats() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", None);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.reaped, 0);
    }

    #[test]
    fn test_store_stats_counts_reaped() {
        let mut store = Store::new();

        store.set("key1".to_string(), "value1", Some(Duration::from_millis(5)));
        sleep(Duration::from_millis(20));
        store.sweep_expired();

        assert_eq!(store.stats().reaped, 1);
    }
}
