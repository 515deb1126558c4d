//! # Web API
//!
//! HTTP boundary of the device fleet API: router assembly, shared state,
//! authentication middleware, and error-to-status-code mapping. Handlers
//! stay thin; business rules live in the validation, scope, and state
//! machine modules.

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod state;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Assemble the application router.
///
/// Every entity route sits behind the API-key gate; `/health` and the
/// OpenAPI document stay open. Unmatched routes get a plain-text 404.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/devices",
            get(handlers::devices::list_devices).post(handlers::devices::create_device),
        )
        .route(
            "/devices/{id}",
            get(handlers::devices::get_device)
                .patch(handlers::devices::update_device)
                .delete(handlers::devices::delete_device),
        )
        .route(
            "/device-models",
            get(handlers::device_models::list_device_models)
                .post(handlers::device_models::create_device_model),
        )
        .route(
            "/device-models/{id}",
            get(handlers::device_models::get_device_model)
                .patch(handlers::device_models::update_device_model)
                .delete(handlers::device_models::delete_device_model),
        )
        .route(
            "/device-types",
            get(handlers::device_types::list_device_types)
                .post(handlers::device_types::create_device_type),
        )
        .route(
            "/device-types/{id}",
            get(handlers::device_types::get_device_type)
                .patch(handlers::device_types::update_device_type)
                .delete(handlers::device_types::delete_device_type),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health::basic_health))
        .route("/api-docs/openapi.json", get(openapi::serve_openapi))
        .fallback(fallback_404)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Last-resort handler when no route matches the request.
async fn fallback_404() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 not found")
}
