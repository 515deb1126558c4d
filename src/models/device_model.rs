use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::error::Result;

/// DeviceModel is a named device variant belonging to exactly one type.
/// Maps to the `device_model` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModel {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
}

/// Denormalized model view produced by joining device_model → device_type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModelView {
    pub model_id: i32,
    pub model_name: String,
    pub type_id: i32,
    pub type_name: String,
}

/// New DeviceModel for creation (without the generated identifier)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceModel {
    pub name: String,
    pub type_id: i32,
}

/// Partial update for a device model. `None` means the field was absent from
/// the request and stays untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDeviceModel {
    pub name: Option<String>,
    pub type_id: Option<i32>,
}

impl UpdateDeviceModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.type_id.is_none()
    }
}

impl DeviceModel {
    /// Insert a new device model, returning the generated identifier.
    pub async fn create(pool: &PgPool, new_model: &NewDeviceModel) -> Result<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO device_model (name, type_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_model.name)
        .bind(new_model.type_id)
        .fetch_optional(pool)
        .await?;

        Ok(id)
    }

    /// Find a device model by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<DeviceModel>> {
        let model = sqlx::query_as::<_, DeviceModel>(
            "SELECT id, name, type_id FROM device_model WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(model)
    }

    /// Update only the supplied fields. Returns false when no row matched.
    pub async fn update(pool: &PgPool, id: i32, changes: &UpdateDeviceModel) -> Result<bool> {
        if changes.is_empty() {
            return Ok(Self::find_by_id(pool, id).await?.is_some());
        }

        let result = sqlx::query(
            "UPDATE device_model SET name = COALESCE($2, name), type_id = COALESCE($3, type_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.type_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a device model. Returns false when no row matched.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM device_model WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count models referencing a device type (delete guard for types).
    pub async fn count_for_type(pool: &PgPool, type_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM device_model WHERE type_id = $1",
        )
        .bind(type_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
