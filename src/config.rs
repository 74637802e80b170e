//! Configuration Module
//!
//! Loads server configuration from environment variables with defaults.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity bound for the cache; 0 = unbounded (TTL-only mode)
    pub max_entries: usize,
    /// Default TTL in seconds applied when a set carries no explicit TTL;
    /// 0 = entries never expire by default
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Snapshot file path; None disables persistence
    pub snapshot_path: Option<PathBuf>,
    /// Auto-backup interval in seconds; 0 disables the backup task
    pub auto_backup_interval: u64,
    /// Expected X-API-Key value; None disables authentication
    pub api_key: Option<String>,
}

impl Config {
    /// Loads values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Capacity bound, 0 = unbounded (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds, 0 = no expiry (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 30)
    /// - `SNAPSHOT_PATH` - Snapshot file path (default: unset, persistence off)
    /// - `AUTO_BACKUP_INTERVAL` - Backup frequency in seconds, 0 = off (default: 0)
    /// - `API_KEY` - Expected API key header value (default: unset, auth off)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            snapshot_path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
            auto_backup_interval: env::var("AUTO_BACKUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            sweep_interval: 30,
            snapshot_path: None,
            auto_backup_interval: 0,
            api_key: None,
        }
    }
}
