//! Sweepcache - an in-process expiring cache
//!
//! Stores arbitrary values under string keys, each with an optional
//! time-to-live. Expired entries read as absent immediately (lazy expiry);
//! a background reaper task reclaims their memory on a fixed sweep
//! interval, so reads never pay for physical cleanup.

pub mod cache;
pub mod config;
mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::SweepConfig;
