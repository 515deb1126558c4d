use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::error::Result;

/// DeviceType is the broadest device classification, referenced by models.
/// Maps to the `device_type` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceType {
    pub id: i32,
    pub name: String,
}

/// New DeviceType for creation (without the generated identifier)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceType {
    pub name: String,
}

/// Partial update for a device type. `None` means the field was absent from
/// the request and stays untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDeviceType {
    pub name: Option<String>,
}

impl UpdateDeviceType {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl DeviceType {
    /// Insert a new device type, returning the generated identifier.
    pub async fn create(pool: &PgPool, new_type: &NewDeviceType) -> Result<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO device_type (name) VALUES ($1) RETURNING id",
        )
        .bind(&new_type.name)
        .fetch_optional(pool)
        .await?;

        Ok(id)
    }

    /// Find a device type by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<DeviceType>> {
        let device_type =
            sqlx::query_as::<_, DeviceType>("SELECT id, name FROM device_type WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(device_type)
    }

    /// Update only the supplied fields. Returns false when no row matched.
    pub async fn update(pool: &PgPool, id: i32, changes: &UpdateDeviceType) -> Result<bool> {
        if changes.is_empty() {
            return Ok(Self::find_by_id(pool, id).await?.is_some());
        }

        let result = sqlx::query(
            "UPDATE device_type SET name = COALESCE($2, name) WHERE id = $1",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a device type. Returns false when no row matched.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM device_type WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
