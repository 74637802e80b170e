//! snapcache - An in-memory key-value cache server
//!
//! Combines bounded LRU eviction with per-entry TTL expiration, plus
//! crash-tolerant persistence via JSON snapshots written atomically to disk.

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod persist;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use engine::CacheEngine;
