//! Cache Engine Module
//!
//! The facade owning the shared store, the snapshot path and every background
//! task. All structural mutations serialize on the store's write lock; `list`
//! and snapshot saves copy under the read lock and work on the copy unlocked.
//! Background tasks are signalled through a watch channel and joined in
//! `shutdown`, so no task outlives its engine.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cache::{CacheStats, CacheStore, EntryRecord};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::persist;
use crate::tasks;

// == Cache Engine ==
/// Thread-safe cache engine with TTL expiration, LRU eviction and snapshot
/// persistence.
pub struct CacheEngine {
    /// Shared store; the single lock serializing all mutations
    store: Arc<RwLock<CacheStore>>,
    /// Snapshot file location; None disables persistence
    snapshot_path: Option<PathBuf>,
    /// Shutdown signal for background tasks
    shutdown_tx: watch::Sender<bool>,
    /// Handles of spawned background tasks, joined on shutdown
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine with the given capacity bound (0 = unbounded),
    /// default TTL in seconds (0 = no expiry) and optional snapshot path.
    /// Background tasks are spawned separately.
    pub fn new(max_entries: usize, default_ttl: u64, snapshot_path: Option<PathBuf>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries, default_ttl))),
            snapshot_path,
            shutdown_tx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Creates an engine from server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_entries,
            config.default_ttl,
            config.snapshot_path.clone(),
        )
    }

    // == Operations ==
    /// Upserts a key-value pair. `ttl` in seconds; None uses the configured
    /// default, 0 means no expiry.
    pub async fn set(&self, key: String, value: String, ttl: Option<u64>) {
        let mut store = self.store.write().await;
        store.set(key, value, ttl);
    }

    /// Retrieves a value. None on absent or expired keys; an expired entry is
    /// removed by the read. The write lock is required even on a hit because
    /// the recency touch mutates.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut store = self.store.write().await;
        store.get(key)
    }

    /// Removes a key. Returns whether anything was removed.
    pub async fn delete(&self, key: &str) -> bool {
        let mut store = self.store.write().await;
        store.delete(key)
    }

    /// A copy of all non-expired entries, taken under the read lock.
    pub async fn list(&self) -> HashMap<String, EntryRecord> {
        let store = self.store.read().await;
        store.list()
    }

    /// Current performance counters.
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        store.stats()
    }

    // == Persistence ==
    /// Saves a snapshot to the configured path.
    pub async fn save_snapshot(&self) -> Result<()> {
        let path = self
            .snapshot_path
            .as_ref()
            .ok_or(CacheError::NoSnapshotPath)?;
        persist::save_snapshot(&self.store, path).await
    }

    /// Loads a snapshot from the configured path. A missing file leaves the
    /// store untouched and is not an error.
    pub async fn load_snapshot(&self) -> Result<usize> {
        let path = self
            .snapshot_path
            .as_ref()
            .ok_or(CacheError::NoSnapshotPath)?;
        persist::load_snapshot(&self.store, path).await
    }

    // == Background Tasks ==
    /// Starts the periodic expiry sweep.
    pub fn spawn_sweeper(&self, interval: Duration) {
        let handle = tasks::spawn_sweep_task(
            self.store.clone(),
            interval,
            self.shutdown_tx.subscribe(),
        );
        self.tasks.lock().unwrap().push(handle);
    }

    /// Starts the periodic snapshot backup. Skipped with a warning when no
    /// snapshot path is configured.
    pub fn spawn_auto_backup(&self, interval: Duration) {
        let Some(path) = self.snapshot_path.clone() else {
            warn!("auto-backup requested but no snapshot path is configured");
            return;
        };
        let handle = tasks::spawn_backup_task(
            self.store.clone(),
            path,
            interval,
            self.shutdown_tx.subscribe(),
        );
        self.tasks.lock().unwrap().push(handle);
    }

    // == Shutdown ==
    /// Signals every background task to stop and joins them. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock().unwrap();
            tasks.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Shared handle to the underlying store.
    #[cfg(test)]
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }
}
