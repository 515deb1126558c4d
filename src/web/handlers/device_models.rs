//! # Device Model Handlers
//!
//! CRUD endpoints for device models. Reads go through the model→type joined
//! view; deletes are blocked while devices still reference the model.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::models::{Device, DeviceModel, DeviceModelView};
use crate::validation::{self, DeviceModelQueryParams};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::handlers::IdResponse;
use crate::web::state::AppState;

/// List device models: GET /device-models
#[utoipa::path(
    get,
    path = "/device-models",
    params(DeviceModelQueryParams),
    responses(
        (status = 200, description = "Device models returned", body = Vec<DeviceModelView>),
        (status = 400, description = "Invalid filter", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-models"
)]
pub async fn list_device_models(
    State(state): State<AppState>,
    Query(params): Query<DeviceModelQueryParams>,
) -> ApiResult<Json<Vec<DeviceModelView>>> {
    let filters = validation::parse_device_model_filters(&params)?;

    let mut scope = DeviceModel::scope();
    if let Some(name) = &filters.name {
        scope = scope.name_contains(name);
    }
    if let Some(type_name) = &filters.type_name {
        scope = scope.type_contains(type_name);
    }

    let models = scope.all(&state.db_pool).await?;
    Ok(Json(models))
}

/// Get a device model by ID: GET /device-models/{id}
#[utoipa::path(
    get,
    path = "/device-models/{id}",
    params(("id" = i32, Path, description = "Device model identifier")),
    responses(
        (status = 200, description = "Device model found", body = DeviceModelView),
        (status = 404, description = "Device model not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-models"
)]
pub async fn get_device_model(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<DeviceModelView>> {
    validation::validate_entity_id("id", id)?;

    let model = DeviceModel::scope()
        .by_id(id)
        .first(&state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Device model {id} not found")))?;

    Ok(Json(model))
}

/// Create a device model: POST /device-models
#[utoipa::path(
    post,
    path = "/device-models",
    request_body = crate::models::NewDeviceModel,
    responses(
        (status = 200, description = "Device model created", body = IdResponse),
        (status = 400, description = "Invalid request body", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-models"
)]
pub async fn create_device_model(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    let new_model = validation::parse_new_device_model(&body)?;

    let id = DeviceModel::create(&state.db_pool, &new_model)
        .await?
        .ok_or_else(|| ApiError::internal("Insert in DB failed"))?;

    info!(model_id = id, name = %new_model.name, "device model created");
    Ok(Json(IdResponse { id }))
}

/// Modify a device model: PATCH /device-models/{id}
#[utoipa::path(
    patch,
    path = "/device-models/{id}",
    params(("id" = i32, Path, description = "Device model identifier")),
    request_body = crate::models::UpdateDeviceModel,
    responses(
        (status = 200, description = "Device model modified", body = IdResponse),
        (status = 400, description = "Invalid request body", body = crate::web::errors::ErrorBody),
        (status = 404, description = "Device model not found", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-models"
)]
pub async fn update_device_model(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;
    let changes = validation::parse_update_device_model(&body)?;

    let matched = DeviceModel::update(&state.db_pool, id, &changes).await?;
    if !matched {
        return Err(ApiError::not_found(format!("Device model {id} not found")));
    }

    info!(model_id = id, "device model modified");
    Ok(Json(IdResponse { id }))
}

/// Delete a device model: DELETE /device-models/{id}
///
/// Blocked with 409 while devices still reference the model.
#[utoipa::path(
    delete,
    path = "/device-models/{id}",
    params(("id" = i32, Path, description = "Device model identifier")),
    responses(
        (status = 200, description = "Device model deleted", body = IdResponse),
        (status = 404, description = "Device model not found", body = crate::web::errors::ErrorBody),
        (status = 409, description = "Device model still referenced by devices", body = crate::web::errors::ErrorBody)
    ),
    security(("ApiKeyAuth" = [])),
    tag = "device-models"
)]
pub async fn delete_device_model(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<IdResponse>> {
    validation::validate_entity_id("id", id)?;

    let references = Device::count_for_model(&state.db_pool, id).await?;
    if references > 0 {
        return Err(ApiError::conflict(format!(
            "Device model {id} is referenced by {references} device(s)"
        )));
    }

    let deleted = DeviceModel::delete(&state.db_pool, id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("Device model {id} not found")));
    }

    info!(model_id = id, "device model deleted");
    Ok(Json(IdResponse { id }))
}
