//! Cache Store Module
//!
//! The in-memory engine state: a HashMap keyed by entry, a recency list for
//! LRU eviction, and TTL bookkeeping. The store itself is lock-free; the
//! owning engine serializes access. Every removal funnels through the unlocked
//! `remove_entry` helper so public paths never re-enter one another.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, EntryRecord, RecencyList};

// == Cache Store ==
/// HashMap storage with LRU eviction and TTL expiration.
///
/// `max_entries == 0` disables the capacity bound entirely (TTL-only mode);
/// the eviction strategy is selected by this value at construction, not by a
/// separate type.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Recency order, front = most recent
    recency: RecencyList,
    /// Performance counters
    stats: CacheStats,
    /// Capacity bound; 0 = unbounded
    max_entries: usize,
    /// Default TTL in seconds applied when a set carries no explicit TTL;
    /// 0 = no expiry
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store with the given capacity bound (0 = unbounded) and
    /// default TTL in seconds (0 = entries never expire by default).
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Upserts a key-value pair.
    ///
    /// An existing key has its value and expiry replaced in place and is moved
    /// to the recency front; no eviction check runs. A new key inserted while
    /// the store is at a nonzero capacity first evicts the recency tail.
    ///
    /// `ttl` falls back to the configured default when None; an effective TTL
    /// of zero means the entry never expires.
    pub fn set(&mut self, key: String, value: String, ttl: Option<u64>) {
        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, effective_ttl);

        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), entry);
            self.recency.touch(&key);
            return;
        }

        self.insert_new(key, entry);
    }

    // == Get ==
    /// Retrieves a value, refreshing its recency on a hit.
    ///
    /// An expired entry is removed on the spot (lazy, read-triggered deletion)
    /// and reported as a miss. A miss is a None, not an error.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.recency.touch(key);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes a key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == List ==
    /// A copy of every non-expired entry, keyed by name. Not a live view.
    pub fn list(&self) -> HashMap<String, EntryRecord> {
        self.export()
    }

    /// Snapshot export: clones all non-expired entries against one sampled
    /// clock value. Shared by `list` and the persistence codec.
    pub fn export(&self) -> HashMap<String, EntryRecord> {
        let now = Utc::now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, entry)| (key.clone(), entry.to_record()))
            .collect()
    }

    // == Import ==
    /// Restores snapshot records into the store, preserving each record's
    /// absolute expiry. Records already expired are dropped; colliding keys
    /// are overwritten. Insertion honors the capacity bound, so recency order
    /// after an import is arbitrary by design.
    ///
    /// Returns the number of records inserted.
    pub fn import(&mut self, records: HashMap<String, EntryRecord>) -> usize {
        let now = Utc::now();
        let mut inserted = 0;

        for (key, record) in records {
            let entry = CacheEntry::with_expiry(record.value, record.expiry);
            if entry.is_expired_at(now) {
                continue;
            }
            if self.entries.contains_key(&key) {
                self.entries.insert(key.clone(), entry);
                self.recency.touch(&key);
            } else {
                self.insert_new(key, entry);
            }
            inserted += 1;
        }

        self.stats.set_total_entries(self.entries.len());
        inserted
    }

    // == Sweep Expired ==
    /// Removes every entry whose TTL has elapsed. Capacity eviction never
    /// happens here; that is `set`'s job. Returns the number removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        if count > 0 {
            self.stats.record_expirations(count as u64);
            debug!(removed = count, "sweep removed expired entries");
        }
        count
    }

    // == Stats ==
    /// Current counters with the entry count refreshed.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal Helpers ==
    /// Unlocked removal used by delete, lazy expiry and the sweep. Keeps the
    /// map and the recency list in step.
    fn remove_entry(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    /// Inserts a key not currently present, evicting the recency tail first
    /// when a nonzero capacity bound is full.
    fn insert_new(&mut self, key: String, entry: CacheEntry) {
        if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            if let Some(victim) = self.recency.pop_lru() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
            }
        }

        self.entries.insert(key.clone(), entry);
        self.recency.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Length of the recency list, for invariant assertions.
    #[cfg(test)]
    pub fn recency_len(&self) -> usize {
        self.recency.len()
    }

    #[cfg(test)]
    pub fn recency_keys_are_unique(&self) -> bool {
        self.recency.keys_are_unique()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::thread::sleep;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, 300);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.recency_len(), 1);
    }

    #[test]
    fn test_store_get_missing_key() {
        let mut store = CacheStore::new(100, 300);
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), None);

        assert!(store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.recency_len(), 0);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_missing_is_noop() {
        let mut store = CacheStore::new(100, 300);
        assert!(!store.delete("missing"));
    }

    #[test]
    fn test_store_overwrite_keeps_single_entry() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), None);
        store.set("key1".to_string(), "value2".to_string(), None);

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.recency_len(), 1);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, 300);

        store.set("a".to_string(), "1".to_string(), None);
        store.set("b".to_string(), "2".to_string(), None);
        // Upsert of an existing key must not trigger the eviction check.
        store.set("a".to_string(), "1b".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some("1b".to_string()));
        assert_eq!(store.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), Some(0));

        assert_eq!(store.get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_store_lazy_expiry_on_get() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), Some(1));
        assert!(store.get("key1").is_some());

        sleep(std::time::Duration::from_millis(1100));

        assert_eq!(store.get("key1"), None);
        // The expired entry was removed by the read, not left behind.
        assert_eq!(store.len(), 0);
        assert_eq!(store.recency_len(), 0);

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_store_capacity_scenario() {
        // capacity=2: set a, set b, get a, set c => b evicted.
        let mut store = CacheStore::new(2, 300);

        store.set("a".to_string(), "1".to_string(), None);
        store.set("b".to_string(), "2".to_string(), None);
        assert!(store.get("a").is_some());
        store.set("c".to_string(), "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_some());
        assert!(store.get("c").is_some());
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_store_unbounded_capacity_never_evicts() {
        let mut store = CacheStore::new(0, 300);

        for i in 0..1000 {
            store.set(format!("key{}", i), "v".to_string(), None);
        }

        assert_eq!(store.len(), 1000);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_list_excludes_expired() {
        let mut store = CacheStore::new(100, 300);

        store.set("live".to_string(), "v".to_string(), Some(60));
        store.set("dead".to_string(), "v".to_string(), Some(1));

        sleep(std::time::Duration::from_millis(1100));

        let listing = store.list();
        assert_eq!(listing.len(), 1);
        assert!(listing.contains_key("live"));
        assert!(!listing.contains_key("dead"));
    }

    #[test]
    fn test_store_list_is_a_copy() {
        let mut store = CacheStore::new(100, 300);
        store.set("key1".to_string(), "value1".to_string(), None);

        let mut listing = store.list();
        listing.remove("key1");

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_sweep_removes_only_expired() {
        let mut store = CacheStore::new(100, 300);

        store.set("short".to_string(), "v".to_string(), Some(1));
        store.set("long".to_string(), "v".to_string(), Some(600));
        store.set("forever".to_string(), "v".to_string(), Some(0));

        sleep(std::time::Duration::from_millis(1100));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.recency_len(), 2);
        assert!(store.get("long").is_some());
        assert!(store.get("forever").is_some());
    }

    #[test]
    fn test_store_import_drops_expired_and_preserves_expiry() {
        let mut store = CacheStore::new(100, 300);

        let future = Utc::now() + Duration::seconds(120);
        let past = Utc::now() - Duration::seconds(5);

        let mut records = HashMap::new();
        records.insert(
            "live".to_string(),
            EntryRecord {
                value: "v1".to_string(),
                expiry: Some(future),
            },
        );
        records.insert(
            "dead".to_string(),
            EntryRecord {
                value: "v2".to_string(),
                expiry: Some(past),
            },
        );
        records.insert(
            "forever".to_string(),
            EntryRecord {
                value: "v3".to_string(),
                expiry: None,
            },
        );

        let inserted = store.import(records);

        assert_eq!(inserted, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.recency_len(), 2);
        assert_eq!(store.get("dead"), None);
        assert_eq!(store.get("forever"), Some("v3".to_string()));

        // The original absolute expiry survived the import.
        let listing = store.list();
        assert_eq!(listing["live"].expiry, Some(future));
    }

    #[test]
    fn test_store_import_honors_capacity() {
        let mut store = CacheStore::new(2, 300);

        let mut records = HashMap::new();
        for i in 0..5 {
            records.insert(
                format!("key{}", i),
                EntryRecord {
                    value: "v".to_string(),
                    expiry: None,
                },
            );
        }

        store.import(records);

        assert_eq!(store.len(), 2);
        assert_eq!(store.recency_len(), 2);
    }

    #[test]
    fn test_store_stats_counts() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1".to_string(), "value1".to_string(), None);
        store.get("key1");
        store.get("missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
