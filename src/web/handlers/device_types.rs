//! # Device Type Handlers
//!
//! CRUD endpoints for device types, the root of the classification
//! hierarchy. Deletes are blocked while models still reference the type.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::models::{DeviceModel, DeviceType};
use crate::validation::{self, DeviceTypeQueryParams};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::handlers::IdResponse;
use crate::web::state::AppState;

/// List device types: GET /device-types
#[utoipa::path(
    get,
    path = "/device-types",
    params(DeviceTypeQueryParams),
    responses(
        (status = 200, description = "Device types returned", body = Vec<DeviceType>),
        (status = 400, description = "Invalid filter", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-types"
)]
pub async fn list_device_types(
    State(state): State<AppState>,
    Query(params): Query<DeviceTypeQueryParams>,
) -> ApiResult<Json<Vec<DeviceType>>> {
    let filters = validation::parse_device_type_filters(&params)?;

    let mut scope = DeviceType::scope();
    if let Some(name) = &filters.name {
        scope = scope.name_contains(name);
    }

    let types = scope.all(&state.db_pool).await?;
    Ok(Json(types))
}

/// Get a device type by ID: GET /device-types/{id}
#[utoipa::path(
    get,
    path = "/device-types/{id}",
    params(("id" = i32, Path, description = "Device type identifier")),
    responses(
        (status = 200, description = "Device type found", body = DeviceType),
        (status = 404, description = "Device type not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-types"
)]
pub async fn get_device_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<DeviceType>> {
    validation::validate_entity_id("id", id)?;

    let device_type = DeviceType::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Device type {id} not found")))?;

    Ok(Json(device_type))
}

/// Create a device type: POST /device-types
#[utoipa::path(
    post,
    path = "/device-types",
    request_body = crate::models::NewDeviceType,
    responses(
        (status = 200, description = "Device type created", body = IdResponse),
        (status = 400, description = "Invalid request body", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-types"
)]
pub async fn create_device_type(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    let new_type = validation::parse_new_device_type(&body)?;

    let id = DeviceType::create(&state.db_pool, &new_type)
        .await?
        .ok_or_else(|| ApiError::internal("Insert in DB failed"))?;

    info!(type_id = id, name = %new_type.name, "device type created");
    Ok(Json(IdResponse { id }))
}

/// Modify a device type: PATCH /device-types/{id}
#[utoipa::path(
    patch,
    path = "/device-types/{id}",
    params(("id" = i32, Path, description = "Device type identifier")),
    request_body = crate::models::UpdateDeviceType,
    responses(
        (status = 200, description = "Device type modified", body = IdResponse),
        (status = 400, description = "Invalid request body", body = crate::web::errors::ErrorBody),
        (status = 404, description = "Device type not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-types"
)]
pub async fn update_device_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;
    let changes = validation::parse_update_device_type(&body)?;

    let matched = DeviceType::update(&state.db_pool, id, &changes).await?;
    if !matched {
        return Err(ApiError::not_found(format!("Device type {id} not found")));
    }

    info!(type_id = id, "device type modified");
    Ok(Json(IdResponse { id }))
}

/// Delete a device type: DELETE /device-types/{id}
///
/// Blocked with 409 while models still reference the type.
#[utoipa::path(
    delete,
    path = "/device-types/{id}",
    params(("id" = i32, Path, description = "Device type identifier")),
    responses(
        (status = 200, description = "Device type deleted", body = IdResponse),
        (status = 404, description = "Device type not found", body = crate::web::errors::ErrorBody),
        (status = 409, description = "Device type still referenced by models", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-types"
)]
pub async fn delete_device_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;

    let references = DeviceModel::count_for_type(&state.db_pool, id).await?;
    if references > 0 {
        return Err(ApiError::conflict(format!(
            "Device type {id} is referenced by {references} device model(s)"
        )));
    }

    let deleted = DeviceType::delete(&state.db_pool, id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("Device type {id} not found")));
    }

    info!(type_id = id, "device type deleted");
    Ok(Json(IdResponse { id }))
}
