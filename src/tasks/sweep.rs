//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the periodic expiry sweep.
///
/// Each tick takes the write lock, removes every expired entry and releases
/// the lock; the scan is O(entry count) so foreground pauses stay bounded.
/// Capacity eviction never happens here. The task exits when `shutdown`
/// observes a true value, which lets the engine join it.
pub fn spawn_sweep_task(
    store: Arc<RwLock<CacheStore>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "expiry sweep task started");
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so the task sleeps first.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut store = store.write().await;
                        store.sweep_expired()
                    };
                    if removed > 0 {
                        info!(removed, "expiry sweep removed entries");
                    } else {
                        debug!("expiry sweep found nothing to remove");
                    }
                }
                changed = shutdown.changed() => {
                    // A closed channel means the engine is gone; stop rather
                    // than spin on an error that will never clear.
                    if changed.is_err() || *shutdown.borrow() {
                        info!("expiry sweep task stopping");
                        break;
                    }
                }
            }
        }
    })
}
