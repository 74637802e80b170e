//! Auto Backup Task
//!
//! Background task that saves a snapshot at a fixed interval.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::cache::CacheStore;
use crate::persist;

/// Spawns the periodic snapshot backup.
///
/// A failed save is reported once per tick and the engine keeps serving; no
/// retry is attempted. The task exits when `shutdown` observes a true value.
pub fn spawn_backup_task(
    store: Arc<RwLock<CacheStore>>,
    path: PathBuf,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            path = %path.display(),
            "auto-backup task started"
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = persist::save_snapshot(&store, &path).await {
                        error!(error = %err, "scheduled backup failed");
                    }
                }
                changed = shutdown.changed() => {
                    // A closed channel means the engine is gone; stop rather
                    // than spin on an error that will never clear.
                    if changed.is_err() || *shutdown.borrow() {
                        info!("auto-backup task stopping");
                        break;
                    }
                }
            }
        }
    })
}
