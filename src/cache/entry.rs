//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value plus its optional expiry instant.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Expiry instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry with an optional TTL.
    ///
    /// A `None` or zero TTL produces an entry that never expires; any
    /// positive TTL expires the entry at `now + ttl`. `Instant` keeps
    /// expiry monotonic, so wall-clock adjustments cannot revive or
    /// prematurely expire an entry.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let expires_at = match ttl {
            Some(ttl) if !ttl.is_zero() => Some(Instant::now() + ttl),
            _ => None,
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant reaches its expiry
    /// instant; an entry without one never expires.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant.
    ///
    /// Lets a scan over many entries judge them all against one timestamp
    /// instead of re-reading the clock per entry.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL that hasn't elapsed
    /// - `None` if the entry has no expiry
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
