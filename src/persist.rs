//! Snapshot Persistence Module
//!
//! Encodes the cache to a JSON file and restores it. The on-disk format is an
//! object mapping each key to `{ "value": ..., "expiry": <RFC3339> }`, with
//! `expiry` omitted for entries that never expire.
//!
//! The store lock is held only while copying entries in or out of memory; all
//! disk I/O runs unlocked. Writes go to a temporary sibling file first and are
//! renamed into place, so a crash mid-write never leaves a partial snapshot.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStore, EntryRecord};
use crate::error::Result;

// == Save Snapshot ==
/// Writes all non-expired entries to `path`.
///
/// The parent directory is created if missing. The encoded bytes are written
/// to `<path>.tmp` and renamed over the target.
pub async fn save_snapshot(store: &Arc<RwLock<CacheStore>>, path: &Path) -> Result<()> {
    // Copy under the read lock, encode and write unlocked.
    let records = {
        let store = store.read().await;
        store.export()
    };
    let entry_count = records.len();

    let data = serde_json::to_vec_pretty(&records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = unique_temp_path(path);
    tokio::fs::write(&temp_path, &data).await?;
    tokio::fs::rename(&temp_path, path).await?;

    info!(entries = entry_count, path = %path.display(), "snapshot saved");
    Ok(())
}

/// Sibling temp path unique to this save. Concurrent saves (a manual save
/// racing the auto-backup) must never share a temp file, or interleaved
/// writes could rename a corrupt snapshot into place.
fn unique_temp_path(path: &Path) -> PathBuf {
    static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_extension(format!("tmp.{}.{}", std::process::id(), seq))
}

// == Load Snapshot ==
/// Restores entries from `path` into the store.
///
/// A missing file is not an error; the store is left untouched. The file is
/// fully decoded before the store is mutated, so a malformed snapshot leaves
/// the store in its prior state. Records whose expiry has already passed are
/// dropped; the rest keep their original absolute expiry. Recency order after
/// a load is arbitrary.
///
/// Returns the number of entries restored.
pub async fn load_snapshot(store: &Arc<RwLock<CacheStore>>, path: &Path) -> Result<usize> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file, starting empty");
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };

    // Decode before taking the lock: load is all-or-nothing.
    let records: HashMap<String, EntryRecord> = serde_json::from_slice(&data)?;

    let inserted = {
        let mut store = store.write().await;
        store.import(records)
    };

    info!(entries = inserted, path = %path.display(), "snapshot loaded");
    Ok(inserted)
}
