//! Cache Facade Module
//!
//! The public operation surface and lifecycle control. Wraps the storage
//! core in a read-write lock, owns the reaper task, and turns the
//! running-to-closed transition into an idempotent `close` call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::cache::{CacheStats, Store};
use crate::config::SweepConfig;
use crate::tasks::spawn_reaper;

// == Cache ==
/// A concurrent expiring cache.
///
/// Values are stored under string keys with an optional TTL. An entry
/// whose TTL has passed reads as absent immediately; its memory is
/// reclaimed later by a background reaper task that the cache spawns at
/// construction and stops on [`close`](Cache::close).
///
/// The cache is safe to share across tasks (typically behind an `Arc`).
/// Values are returned by clone; wrap large payloads in an `Arc` if
/// cloning them matters.
///
/// Construction spawns the reaper, so it must happen inside a Tokio
/// runtime.
#[derive(Debug)]
pub struct Cache<V> {
    /// Shared storage core; the reaper holds the other reference
    store: Arc<RwLock<Store<V>>>,
    /// Stop signal for the reaper
    shutdown: watch::Sender<bool>,
    /// Reaper handle, taken by the first `close`
    reaper: Mutex<Option<JoinHandle<()>>>,
    /// One-way running-to-closed latch
    closed: AtomicBool,
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache with the sweep interval resolved from configuration.
    pub fn new(config: &SweepConfig) -> Self {
        Self::with_sweep_interval(config.sweep_interval())
    }

    /// Creates a cache that sweeps expired entries every `period`.
    ///
    /// Spawns the reaper task immediately; the cache is in its running
    /// state when this returns.
    pub fn with_sweep_interval(period: Duration) -> Self {
        let store = Arc::new(RwLock::new(Store::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(Arc::clone(&store), period, shutdown_rx);

        Self {
            store,
            shutdown,
            reaper: Mutex::new(Some(reaper)),
            closed: AtomicBool::new(false),
        }
    }

    // == Set ==
    /// Stores a value under a key with an optional TTL.
    ///
    /// Overwrites any existing entry under the key. A `None` or zero TTL
    /// stores the value forever. The write is visible to all readers as
    /// soon as this returns.
    ///
    /// Ignored on a closed cache, on a best-effort basis: a `set` racing
    /// a concurrent `close` may still land. Callers own the contract of
    /// not using a cache they are closing.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        if self.is_closed() {
            return;
        }

        self.store.write().await.set(key.into(), value, ttl);
    }

    // == Get ==
    /// Retrieves the value for a key, if present and not expired.
    ///
    /// Lazy expiry: an entry whose TTL has passed returns `None` even if
    /// the reaper has not swept it yet.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key)
    }

    // == Delete ==
    /// Removes a key, returning whether it was present.
    ///
    /// Deleting an absent key is a no-op. Ignored on a closed cache
    /// (best-effort, as for [`set`](Cache::set)).
    pub async fn delete(&self, key: &str) -> bool {
        if self.is_closed() {
            return false;
        }

        self.store.write().await.delete(key)
    }

    // == Range ==
    /// Visits every live entry, in unspecified order.
    ///
    /// Expired entries are never yielded. The visitor returns `false` to
    /// stop early. The walk holds the read lock, so the visitor sees each
    /// entry's key and value as a consistent pair; writers block until the
    /// walk finishes.
    pub async fn range<F>(&self, visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        self.store.read().await.range(visit);
    }

    // == Introspection ==
    /// Returns the number of physically present entries.
    ///
    /// Counts expired entries the reaper has not swept yet, which is what
    /// makes reclamation observable separately from lazy expiry.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns the remaining TTL for a live entry.
    ///
    /// `None` if the key is absent or expired; `Some(None)` if the entry
    /// never expires.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        self.store.read().await.ttl_remaining(key)
    }

    /// Returns a snapshot of the cache's counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Lifecycle ==
    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Closes the cache: stops the reaper and waits for it to exit.
    ///
    /// Idempotent; only the first call does anything, every later call is
    /// a safe no-op. After closing, mutating operations are ignored and
    /// reads keep working against whatever entries remain.
    ///
    /// A cache dropped without `close` does not leak its reaper either:
    /// dropping the shutdown sender wakes the task, which then exits.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        // Receiver dropping would make this an Err; the reaper exits
        // either way.
        let _ = self.shutdown.send(true);

        let handle = self.reaper.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
