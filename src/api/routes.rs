//! API Routes
//!
//! Configures the axum router with all cache server endpoints.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_api_key;
use super::handlers::{
    delete_handler, get_handler, health_handler, list_handler, load_handler, save_handler,
    set_handler, stats_handler, AppState,
};

/// Creates the main router.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `GET /list` - List all non-expired entries
/// - `POST /save` - Save a snapshot to disk
/// - `POST /load` - Load the snapshot from disk
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check (not authenticated)
///
/// Cache endpoints sit behind the API key check; `/health` stays open so
/// probes work without credentials.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/list", get(list_handler))
        .route("/save", post(save_handler))
        .route("/load", post(load_handler))
        .route("/stats", get(stats_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
