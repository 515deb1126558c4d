use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{FleetError, Result};
use crate::state_machine::{check_transition, DeviceStatus};

/// Device is a physical unit tracked by MAC address, belonging to exactly
/// one model. Maps to the `device` table. `status` is nullable: a NULL row
/// has not entered the lifecycle yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i32,
    pub model_id: i32,
    pub mac: String,
    pub status: Option<String>,
}

/// Denormalized device view produced by joining device → model → type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub device_id: i32,
    pub mac: String,
    pub status: Option<String>,
    pub model_id: i32,
    pub model_name: String,
    pub type_id: i32,
    pub type_name: String,
}

/// New Device for creation. Status defaults to `stock` when omitted; the
/// transition check does not apply to creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub model_id: i32,
    pub mac: String,
    #[serde(default)]
    pub status: Option<DeviceStatus>,
}

/// Partial update for a device. `None` means the field was absent from the
/// request and stays untouched; a present status must pass the transition
/// check before anything is written. MAC is immutable in the final API but
/// the column update is kept behind this struct for completeness of the
/// persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDevice {
    pub mac: Option<String>,
    pub status: Option<DeviceStatus>,
}

impl UpdateDevice {
    pub fn is_empty(&self) -> bool {
        self.mac.is_none() && self.status.is_none()
    }
}

impl Device {
    /// Insert a new device, returning the generated identifier.
    pub async fn create(pool: &PgPool, new_device: &NewDevice) -> Result<Option<i32>> {
        let status = new_device.status.unwrap_or_default();

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO device (model_id, mac, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_device.model_id)
        .bind(&new_device.mac)
        .bind(status.to_string())
        .fetch_optional(pool)
        .await?;

        Ok(id)
    }

    /// Find a device row by ID (flat, no joins)
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            "SELECT id, model_id, mac, status FROM device WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(device)
    }

    /// Apply a partial update to a device.
    ///
    /// When a status change is requested, the current status is read under a
    /// row lock and checked against the transition table before the update is
    /// written; read, check, and write share one transaction so two
    /// concurrent requests cannot both pass the check against a stale status.
    pub async fn update(pool: &PgPool, id: i32, changes: &UpdateDevice) -> Result<i32> {
        let mut tx = pool.begin().await?;

        let current = sqlx::query_as::<_, Device>(
            "SELECT id, model_id, mac, status FROM device WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| FleetError::NotFound(format!("Device {id} not found")))?;

        if let Some(target) = changes.status {
            let current_status = current
                .status
                .as_deref()
                .map(str::parse::<DeviceStatus>)
                .transpose()
                .map_err(FleetError::DatabaseError)?;

            check_transition(current_status, target)?;

            debug!(
                device_id = id,
                from = ?current_status,
                to = %target,
                "device status transition accepted"
            );
        }

        if !changes.is_empty() {
            let mut query = QueryBuilder::<Postgres>::new("UPDATE device SET ");
            let mut fields = query.separated(", ");
            if let Some(mac) = &changes.mac {
                fields.push("mac = ");
                fields.push_bind_unseparated(mac.clone());
            }
            if let Some(status) = changes.status {
                fields.push("status = ");
                fields.push_bind_unseparated(status.to_string());
            }
            query.push(" WHERE id = ");
            query.push_bind(id);

            // The row is held under FOR UPDATE in this transaction, so the
            // update must match it.
            let result = query.build().execute(&mut *tx).await?;
            if result.rows_affected() == 0 {
                return Err(FleetError::DatabaseError(format!(
                    "Locked device {id} missing at update"
                )));
            }
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Delete a device. Returns false when no row matched.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM device WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count devices referencing a device model (delete guard for models).
    pub async fn count_for_model(pool: &PgPool, model_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM device WHERE model_id = $1",
        )
        .bind(model_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_device_status_defaults_to_stock() {
        let parsed: NewDevice =
            serde_json::from_str(r#"{"modelId": 1, "mac": "AA:BB:CC:DD:EE:01"}"#).unwrap();
        assert_eq!(parsed.status, None);
        assert_eq!(parsed.status.unwrap_or_default(), DeviceStatus::Stock);
    }

    #[test]
    fn test_update_device_absent_fields_stay_absent() {
        let parsed: UpdateDevice = serde_json::from_str(r#"{"status": "installé"}"#).unwrap();
        assert_eq!(parsed.mac, None);
        assert_eq!(parsed.status, Some(DeviceStatus::Installed));

        let empty: UpdateDevice = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_device_view_serializes_camel_case() {
        let view = DeviceView {
            device_id: 7,
            mac: "AA:BB:CC:DD:EE:01".to_string(),
            status: Some("stock".to_string()),
            model_id: 1,
            model_name: "EdgeRouter X".to_string(),
            type_id: 2,
            type_name: "router".to_string(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["deviceId"], 7);
        assert_eq!(json["modelName"], "EdgeRouter X");
        assert_eq!(json["typeName"], "router");
    }
}
