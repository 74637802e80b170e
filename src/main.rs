//! snapcache - An in-memory key-value cache server
//!
//! Startup sequence: initialize tracing, load configuration from the
//! environment, build the engine (restoring the snapshot when one exists),
//! start the background tasks, then serve HTTP until a shutdown signal.

mod api;
mod cache;
mod config;
mod engine;
mod error;
mod models;
mod persist;
mod tasks;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;

#[tokio::main]
async fn main() {
    // Default to "info", overridable with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting snapcache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl={}s, port={}, sweep_interval={}s, auto_backup={}s",
        config.max_entries,
        config.default_ttl,
        config.server_port,
        config.sweep_interval,
        config.auto_backup_interval
    );

    let state = AppState::from_config(&config);
    let engine = state.engine.clone();

    // Restore the previous snapshot. A missing file means a cold start; a
    // malformed one is reported and the server starts empty.
    if config.snapshot_path.is_some() {
        match engine.load_snapshot().await {
            Ok(restored) => info!(restored, "startup snapshot restore complete"),
            Err(err) => warn!(error = %err, "startup snapshot restore failed, starting empty"),
        }
    }

    engine.spawn_sweeper(Duration::from_secs(config.sweep_interval));
    if config.auto_backup_interval > 0 {
        engine.spawn_auto_backup(Duration::from_secs(config.auto_backup_interval));
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Stop and join the sweep/backup tasks before exiting.
    engine.shutdown().await;
    info!("Server shutdown complete");
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
