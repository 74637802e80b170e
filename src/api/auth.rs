//! API Key Authentication
//!
//! Header-comparison check of `X-API-Key` against the value injected from
//! configuration at construction. When no key is configured the check is
//! disabled and every request passes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::AppState;
use crate::error::CacheError;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware rejecting requests whose `X-API-Key` header does not match the
/// configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = state.api_key.as_deref() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            return CacheError::Unauthorized.into_response();
        }
    }

    next.run(request).await
}
