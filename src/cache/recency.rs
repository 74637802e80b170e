//! Recency List Module
//!
//! Tracks the most- to least-recently-touched order of keys for LRU eviction.

use std::collections::{HashMap, VecDeque};

// Compaction threshold: stale queue events are rebuilt away once they
// outnumber the live keys past this floor.
const COMPACT_FLOOR: usize = 64;

// == Recency List ==
/// Recency order of all live keys, with O(1) amortized touch and removal.
///
/// Every touch appends a `(sequence, key)` event to a queue and records the
/// key's current sequence in a map; only the map entry is authoritative.
/// Eviction pops queue events from the front, discarding stale ones (events
/// whose sequence no longer matches the map), so the first live event is the
/// least-recently-touched key. Sequences are strictly increasing, which makes
/// the order total: among entries touched in the same instant, the earlier
/// physical event is evicted first.
///
/// Stale events are garbage; the queue is compacted once they dominate, which
/// keeps all operations O(1) amortized.
#[derive(Debug, Default)]
pub struct RecencyList {
    /// Authoritative current sequence per live key
    stamps: HashMap<String, u64>,
    /// Touch events, oldest first; entries may be stale
    queue: VecDeque<(u64, String)>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl RecencyList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key most recently used, inserting it if not yet tracked.
    pub fn touch(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stamps.insert(key.to_string(), seq);
        self.queue.push_back((seq, key.to_string()));
        self.maybe_compact();
    }

    // == Remove ==
    /// Drops a key from the order; no-op if untracked. The key's queue events
    /// become stale and are cleaned up lazily.
    pub fn remove(&mut self, key: &str) {
        self.stamps.remove(key);
    }

    // == Pop LRU ==
    /// Removes and returns the least-recently-touched key, or None when empty.
    pub fn pop_lru(&mut self) -> Option<String> {
        while let Some((seq, key)) = self.queue.pop_front() {
            if self.stamps.get(&key) == Some(&seq) {
                self.stamps.remove(&key);
                return Some(key);
            }
        }
        None
    }

    /// The current eviction candidate, without removing it. Stale events in
    /// front of it are discarded on the way.
    pub fn peek_lru(&mut self) -> Option<&String> {
        loop {
            let stale = match self.queue.front() {
                Some((seq, key)) => self.stamps.get(key) != Some(seq),
                None => break,
            };
            if stale {
                self.queue.pop_front();
            } else {
                break;
            }
        }
        self.queue.front().map(|(_, key)| key)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Rebuilds the queue without stale events once they dominate it.
    fn maybe_compact(&mut self) {
        if self.queue.len() > COMPACT_FLOOR && self.queue.len() > 2 * self.stamps.len() {
            let stamps = &self.stamps;
            self.queue.retain(|(seq, key)| stamps.get(key) == Some(seq));
        }
    }

    /// True when every live key has exactly one matching queue event. Used by
    /// invariant checks.
    #[cfg(test)]
    pub fn keys_are_unique(&self) -> bool {
        self.stamps.iter().all(|(key, seq)| {
            self.queue
                .iter()
                .filter(|(qseq, qkey)| qkey == key && qseq == seq)
                .count()
                == 1
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency_new_is_empty() {
        let mut list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.pop_lru(), None);
    }

    #[test]
    fn test_recency_first_inserted_is_lru() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("b");
        list.touch("c");

        assert_eq!(list.len(), 3);
        assert_eq!(list.peek_lru(), Some(&"a".to_string()));
    }

    #[test]
    fn test_recency_touch_moves_to_front() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("b");
        list.touch("c");

        list.touch("a");

        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_lru(), Some("b".to_string()));
        assert_eq!(list.pop_lru(), Some("c".to_string()));
        assert_eq!(list.pop_lru(), Some("a".to_string()));
    }

    #[test]
    fn test_recency_touch_is_idempotent_on_length() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("a");
        list.touch("a");

        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_lru(), Some("a".to_string()));
        assert!(list.is_empty());
    }

    #[test]
    fn test_recency_remove() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("b");
        list.touch("c");

        list.remove("b");

        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_lru(), Some("a".to_string()));
        assert_eq!(list.pop_lru(), Some("c".to_string()));
    }

    #[test]
    fn test_recency_remove_untracked_key_is_noop() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.remove("missing");

        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_recency_pop_order_follows_touches() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("b");
        list.touch("c");
        // Re-touch in a different order; 'a' ends up least recent.
        list.touch("a");
        list.touch("c");
        list.touch("b");

        assert_eq!(list.pop_lru(), Some("a".to_string()));
        assert_eq!(list.pop_lru(), Some("c".to_string()));
        assert_eq!(list.pop_lru(), Some("b".to_string()));
    }

    #[test]
    fn test_recency_peek_skips_removed_keys() {
        let mut list = RecencyList::new();

        list.touch("a");
        list.touch("b");
        list.remove("a");

        assert_eq!(list.peek_lru(), Some(&"b".to_string()));
    }

    #[test]
    fn test_recency_order_survives_heavy_churn() {
        // Enough re-touches to force several compactions of stale events.
        let mut list = RecencyList::new();
        for i in 0..1000 {
            list.touch(&format!("k{}", i % 10));
        }

        assert_eq!(list.len(), 10);
        assert!(list.keys_are_unique());
        // The last full cycle touched k0 through k9 in order.
        for i in 0..10 {
            assert_eq!(list.pop_lru(), Some(format!("k{}", i)));
        }
        assert!(list.is_empty());
    }

    #[test]
    fn test_recency_queue_stays_bounded_under_retouching() {
        let mut list = RecencyList::new();
        for _ in 0..10_000 {
            list.touch("hot");
        }

        assert_eq!(list.len(), 1);
        // Compaction keeps stale events from accumulating without bound.
        assert!(list.queue.len() <= 2 * COMPACT_FLOOR);
    }
}
