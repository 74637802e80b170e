//! Background Tasks Module
//!
//! Periodic tasks owned by the cache engine. Each loops on an interval tick
//! and a shutdown watch signal, so the engine can stop and join them.
//!
//! # Tasks
//! - Expiry sweep: removes entries whose TTL elapsed
//! - Auto backup: saves a snapshot at a fixed interval

mod backup;
mod sweep;

pub use backup::spawn_backup_task;
pub use sweep::spawn_sweep_task;
