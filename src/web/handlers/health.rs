//! # Health Check Handler
//!
//! Unauthenticated liveness endpoint for monitoring and load balancing.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Basic health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Basic health check endpoint: GET /health
///
/// Returns OK whenever the service is running; it does not touch the
/// database and is always available.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
