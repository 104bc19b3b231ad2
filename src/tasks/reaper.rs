//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Store;

/// Spawns the background task that periodically sweeps expired entries.
///
/// The task sleeps for `period`, takes the write lock, physically removes
/// every expired entry, and repeats. It stops when the shutdown channel
/// signals or its sender is dropped. Sweeping is pure space reclamation;
/// reads handle expiry themselves and never wait for a sweep.
///
/// One reaper is spawned per cache, at construction; the cache awaits the
/// returned handle when it closes.
pub(crate) fn spawn_reaper<V>(
    store: Arc<RwLock<Store<V>>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(period_secs = period.as_secs_f64(), "reaper started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(period) => {
                    let removed = store.write().await.sweep_expired();

                    if removed > 0 {
                        info!(removed, "reaper swept expired entries");
                    } else {
                        debug!("reaper found no expired entries");
                    }
                }
                // Err means the sender was dropped; stop either way.
                _ = shutdown.changed() => {
                    info!("reaper stopping");
                    return;
                }
            }
        }
    })
}
