//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. The engine decides
//! cache semantics; handlers translate between HTTP and engine results (a
//! miss becomes a 404 here, not inside the engine).

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::EntryRecord;
use crate::config::Config;
use crate::engine::CacheEngine;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse, SnapshotResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache engine
    pub engine: Arc<CacheEngine>,
    /// Expected API key, injected from configuration; None disables auth
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Wraps an engine with an optional API key.
    pub fn new(engine: Arc<CacheEngine>, api_key: Option<String>) -> Self {
        Self {
            engine,
            api_key: api_key.map(Arc::from),
        }
    }

    /// Builds state (engine included) from server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CacheEngine::from_config(config)), config.api_key.clone())
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.engine.set(req.key.clone(), req.value, req.ttl).await;
    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.engine.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key still succeeds; delete is a no-op in that case.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.engine.delete(&key).await;
    Json(DeleteResponse::new(key))
}

/// Handler for GET /list
pub async fn list_handler(
    State(state): State<AppState>,
) -> Json<HashMap<String, EntryRecord>> {
    Json(state.engine.list().await)
}

/// Handler for POST /save
pub async fn save_handler(State(state): State<AppState>) -> Result<Json<SnapshotResponse>> {
    state.engine.save_snapshot().await?;
    Ok(Json(SnapshotResponse::saved()))
}

/// Handler for POST /load
pub async fn load_handler(State(state): State<AppState>) -> Result<Json<SnapshotResponse>> {
    let restored = state.engine.load_snapshot().await?;
    Ok(Json(SnapshotResponse::loaded(restored)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.engine.stats().await;
    Json(StatsResponse::from_stats(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
