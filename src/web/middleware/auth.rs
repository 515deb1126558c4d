//! # Authentication Middleware
//!
//! Static API-key check for protected endpoints. The presented `X-API-KEY`
//! header must match one of the keys configured at startup; anything else is
//! rejected with 401 before the request reaches a handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::web::errors::ApiError;
use crate::web::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication middleware for protected endpoints
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if state.config.is_valid_api_key(key) => Ok(next.run(request).await),
        Some(_) => {
            warn!(path = %request.uri().path(), "rejected request with invalid API key");
            Err(ApiError::Unauthorized)
        }
        None => {
            warn!(path = %request.uri().path(), "rejected request with missing API key");
            Err(ApiError::Unauthorized)
        }
    }
}
