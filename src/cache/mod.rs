//! Cache Module
//!
//! A concurrent expiring cache: string keys, opaque values, optional
//! per-entry TTL. Expiry is lazy on read; physical removal is the
//! reaper's job. The storage core stays crate-private so the operation
//! surface on [`Cache`] is the only way in.

#[allow(clippy::module_inception)]
mod cache;
mod entry;
mod stats;
mod store;


pub use cache::Cache;
pub use stats::CacheStats;

pub(crate) use entry::Entry;
pub(crate) use store::Store;
