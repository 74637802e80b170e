//! Cache Module
//!
//! In-memory key-value storage with TTL expiration and LRU eviction.

mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, EntryRecord};
pub use recency::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes, enforced at the API boundary
pub const MAX_KEY_LENGTH: usize = 256;
