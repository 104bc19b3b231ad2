//! Background Tasks Module
//!
//! One task lives here: the reaper, which reclaims expired entries at a
//! fixed sweep interval for the lifetime of its cache.

mod reaper;

pub(crate) use reaper::spawn_reaper;
