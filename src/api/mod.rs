//! API Module
//!
//! HTTP handlers, routing and authentication for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /list` - List all non-expired entries
//! - `POST /save` - Save a snapshot to disk
//! - `POST /load` - Load the snapshot from disk
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
