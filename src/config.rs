//! Configuration Module
//!
//! The sweep configuration consumed by the cache: an interval magnitude
//! plus a unit name, resolved into the reaper's sweep interval.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

// == Sweep Config ==
/// Sweep interval configuration for the cache reaper.
///
/// Usually populated by the owning application's configuration layer
/// (hence the `Deserialize` derive); `from_env` is a convenience for
/// standalone use.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Interval magnitude, multiplied by the resolved unit
    pub interval: i64,
    /// Unit name: "second", "minute" or "hour" (case-insensitive)
    pub duration: String,
}

impl SweepConfig {
    /// Creates a new SweepConfig from an interval magnitude and unit name.
    pub fn new(interval: i64, duration: impl Into<String>) -> Self {
        Self {
            interval,
            duration: duration.into(),
        }
    }

    /// Creates a new SweepConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SWEEP_INTERVAL` - Sweep interval magnitude (default: 1)
    /// - `CACHE_SWEEP_UNIT` - Sweep interval unit (default: "minute")
    pub fn from_env() -> Self {
        Self {
            interval: env::var("CACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            duration: env::var("CACHE_SWEEP_UNIT").unwrap_or_else(|_| "minute".to_string()),
        }
    }

    // == Duration Resolver ==
    /// Resolves the configured magnitude and unit into a sweep interval.
    ///
    /// The unit is matched case-insensitively against "second", "minute"
    /// and "hour". Any other unit, including an empty string, falls back
    /// to minutes; the fallback is logged but not treated as an error,
    /// matching the historical behavior of this configuration knob.
    /// A non-positive magnitude is clamped to 1 and an oversized one
    /// saturates, so the reaper never spins on a zero-length sweep period.
    pub fn sweep_interval(&self) -> Duration {
        let unit = match self.duration.to_lowercase().as_str() {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(3600),
            other => {
                warn!(unit = other, "unrecognized sweep unit, defaulting to minutes");
                Duration::from_secs(60)
            }
        };

        let magnitude = u32::try_from(self.interval.max(1)).unwrap_or(u32::MAX);
        unit.saturating_mul(magnitude)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: 1,
            duration: "minute".to_string(),
        }
    }
}
