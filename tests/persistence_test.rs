//! Database-backed tests for the persistence layer: create/read round trips,
//! transactional status transitions, delete semantics, and filtered queries
//! against real rows. Each test runs against a fresh migrated database.

use sqlx::PgPool;

use device_fleet::error::FleetError;
use device_fleet::models::{
    Device, DeviceModel, DeviceType, NewDevice, NewDeviceModel, NewDeviceType, UpdateDevice,
};
use device_fleet::state_machine::DeviceStatus;

async fn seed_model(
    pool: &PgPool,
    type_name: &str,
    model_name: &str,
) -> Result<i32, FleetError> {
    let type_id = DeviceType::create(
        pool,
        &NewDeviceType {
            name: type_name.to_string(),
        },
    )
    .await?
    .ok_or_else(|| FleetError::DatabaseError("type insert returned no id".to_string()))?;

    DeviceModel::create(
        pool,
        &NewDeviceModel {
            name: model_name.to_string(),
            type_id,
        },
    )
    .await?
    .ok_or_else(|| FleetError::DatabaseError("model insert returned no id".to_string()))
}

async fn seed_device(
    pool: &PgPool,
    model_id: i32,
    mac: &str,
    status: Option<DeviceStatus>,
) -> Result<i32, FleetError> {
    Device::create(
        pool,
        &NewDevice {
            model_id,
            mac: mac.to_string(),
            status,
        },
    )
    .await?
    .ok_or_else(|| FleetError::DatabaseError("device insert returned no id".to_string()))
}

#[sqlx::test]
async fn test_create_then_get_defaults_to_stock(pool: PgPool) -> Result<(), FleetError> {
    let model_id = seed_model(&pool, "router", "EdgeRouter X").await?;
    let device_id = seed_device(&pool, model_id, "AA:BB:CC:DD:EE:01", None).await?;

    let view = Device::scope()
        .by_id(device_id)
        .first(&pool)
        .await?
        .ok_or_else(|| FleetError::NotFound("created device not readable".to_string()))?;

    assert_eq!(view.device_id, device_id);
    assert_eq!(view.mac, "AA:BB:CC:DD:EE:01");
    assert_eq!(view.status.as_deref(), Some("stock"));
    assert_eq!(view.model_name, "EdgeRouter X");
    assert_eq!(view.type_name, "router");
    Ok(())
}

#[sqlx::test]
async fn test_rejected_transition_leaves_stored_status_unchanged(
    pool: PgPool,
) -> Result<(), FleetError> {
    let model_id = seed_model(&pool, "router", "EdgeRouter X").await?;
    let device_id = seed_device(&pool, model_id, "AA:BB:CC:DD:EE:02", None).await?;

    // stock → maintenance skips the cycle and must be refused.
    let changes = UpdateDevice {
        mac: None,
        status: Some(DeviceStatus::Maintenance),
    };
    let err = Device::update(&pool, device_id, &changes)
        .await
        .expect_err("transition against the cycle was accepted");
    assert!(matches!(err, FleetError::StateTransitionError(_)));

    let device = Device::find_by_id(&pool, device_id)
        .await?
        .ok_or_else(|| FleetError::NotFound("device vanished".to_string()))?;
    assert_eq!(device.status.as_deref(), Some("stock"));
    Ok(())
}

#[sqlx::test]
async fn test_accepted_transition_is_persisted(pool: PgPool) -> Result<(), FleetError> {
    let model_id = seed_model(&pool, "router", "EdgeRouter X").await?;
    let device_id = seed_device(&pool, model_id, "AA:BB:CC:DD:EE:03", None).await?;

    let changes = UpdateDevice {
        mac: None,
        status: Some(DeviceStatus::Installed),
    };
    Device::update(&pool, device_id, &changes).await?;

    let device = Device::find_by_id(&pool, device_id)
        .await?
        .ok_or_else(|| FleetError::NotFound("device vanished".to_string()))?;
    assert_eq!(device.status.as_deref(), Some("installé"));
    Ok(())
}

#[sqlx::test]
async fn test_delete_twice_reports_missing_row(pool: PgPool) -> Result<(), FleetError> {
    let model_id = seed_model(&pool, "router", "EdgeRouter X").await?;
    let device_id = seed_device(&pool, model_id, "AA:BB:CC:DD:EE:04", None).await?;

    assert!(Device::delete(&pool, device_id).await?);
    assert!(!Device::delete(&pool, device_id).await?);
    Ok(())
}

#[sqlx::test]
async fn test_conjunctive_filters_select_matching_rows(pool: PgPool) -> Result<(), FleetError> {
    let router_model = seed_model(&pool, "router", "EdgeRouter X").await?;
    let switch_model = seed_model(&pool, "switch", "Catalyst 2960").await?;

    let stock_router =
        seed_device(&pool, router_model, "AA:BB:CC:DD:EE:10", None).await?;
    seed_device(
        &pool,
        router_model,
        "AA:BB:CC:DD:EE:11",
        Some(DeviceStatus::Installed),
    )
    .await?;
    seed_device(&pool, switch_model, "AA:BB:CC:DD:EE:12", None).await?;

    // Filters are conjunctive: stock AND a type name containing "rout"
    // matches only the first device.
    let matches = Device::scope()
        .with_status(DeviceStatus::Stock)
        .type_contains("rout")
        .all(&pool)
        .await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].device_id, stock_router);

    // Adding a mac substring that belongs to the switch empties the result.
    let matches = Device::scope()
        .with_status(DeviceStatus::Stock)
        .type_contains("rout")
        .mac_contains("EE:12")
        .all(&pool)
        .await?;
    assert!(matches.is_empty());
    Ok(())
}
