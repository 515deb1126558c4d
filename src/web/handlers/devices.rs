//! # Device Handlers
//!
//! CRUD endpoints for devices. Reads go through the joined device view;
//! status changes go through the lifecycle transition check inside the data
//! layer's transaction.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::models::{Device, DeviceView};
use crate::validation::{self, DeviceQueryParams};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::handlers::IdResponse;
use crate::web::state::AppState;

/// List devices: GET /devices
///
/// All filters are optional and conjunctive. `mac`, `model`, and `type` are
/// case-insensitive substring matches; `status` is exact.
#[utoipa::path(
    get,
    path = "/devices",
    params(DeviceQueryParams),
    responses(
        (status = 200, description = "Devices returned", body = Vec<DeviceView>),
        (status = 400, description = "Invalid filter", body = crate::web::errors::ErrorBody),
        (status = 401, description = "Missing or invalid API key", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "devices"
)]
pub async fn list_devices(
    State(state): State<AppState>,
    Query(params): Query<DeviceQueryParams>,
) -> ApiResult<Json<Vec<DeviceView>>> {
    let filters = validation::parse_device_filters(&params)?;

    let mut scope = Device::scope();
    if let Some(status) = filters.status {
        scope = scope.with_status(status);
    }
    if let Some(model) = &filters.model {
        scope = scope.model_contains(model);
    }
    if let Some(type_name) = &filters.type_name {
        scope = scope.type_contains(type_name);
    }
    if let Some(mac) = &filters.mac {
        scope = scope.mac_contains(mac);
    }

    let devices = scope.all(&state.db_pool).await?;
    Ok(Json(devices))
}

/// Get a device by ID: GET /devices/{id}
#[utoipa::path(
    get,
    path = "/devices/{id}",
    params(("id" = i32, Path, description = "Device identifier")),
    responses(
        (status = 200, description = "Device found", body = DeviceView),
        (status = 404, description = "Device not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "devices"
)]
pub async fn get_device(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<DeviceView>> {
    validation::validate_entity_id("id", id)?;

    let device = Device::scope()
        .by_id(id)
        .first(&state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Device {id} not found")))?;

    Ok(Json(device))
}

/// Create a device: POST /devices
///
/// Status defaults to `stock`; creation bypasses the transition check.
#[utoipa::path(
    post,
    path = "/devices",
    request_body = crate::models::NewDevice,
    responses(
        (status = 200, description = "Device created", body = IdResponse),
        (status = 400, description = "Invalid request body", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "devices"
)]
pub async fn create_device(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    let new_device = validation::parse_new_device(&body)?;

    let id = Device::create(&state.db_pool, &new_device)
        .await?
        .ok_or_else(|| ApiError::internal("Insert in DB failed"))?;

    info!(device_id = id, mac = %new_device.mac, "device created");
    Ok(Json(IdResponse { id }))
}

/// Modify a device: PATCH /devices/{id}
///
/// Accepts any subset of `{mac, status}`; a requested status change must
/// pass the transition check against the current status.
#[utoipa::path(
    patch,
    path = "/devices/{id}",
    params(("id" = i32, Path, description = "Device identifier")),
    request_body = crate::models::UpdateDevice,
    responses(
        (status = 200, description = "Device modified", body = IdResponse),
        (status = 400, description = "Invalid body or rejected status transition", body = crate::web::errors::ErrorBody),
        (status = 404, description = "Device not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "devices"
)]
pub async fn update_device(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;
    let changes = validation::parse_update_device(&body)?;

    let id = Device::update(&state.db_pool, id, &changes).await?;

    info!(device_id = id, "device modified");
    Ok(Json(IdResponse { id }))
}

/// Delete a device: DELETE /devices/{id}
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    params(("id" = i32, Path, description = "Device identifier")),
    responses(
        (status = 200, description = "Device deleted", body = IdResponse),
        (status = 404, description = "Device not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "devices"
)]
pub async fn delete_device(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;

    let deleted = Device::delete(&state.db_pool, id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("Device {id} not found")));
    }

    info!(device_id = id, "device deleted");
    Ok(Json(IdResponse { id }))
}
