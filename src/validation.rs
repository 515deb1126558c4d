//! # Input Validation
//!
//! Parses raw external input (untyped JSON bodies, query strings) into
//! well-typed records. Validation is pure and never fail-fast: every
//! violated field constraint is collected into a single report so the
//! caller can surface a complete diagnostic in one response.
//!
//! Field contracts: identifiers are integers ≥ 1, MAC addresses and names
//! are non-empty strings, status is one of the lifecycle states. An explicit
//! JSON `null` is treated as an absent field, so a partial update can never
//! unintentionally clear a column.

use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::IntoParams;

use crate::error::{FleetError, Result};
use crate::models::{NewDevice, NewDeviceModel, NewDeviceType, UpdateDevice, UpdateDeviceModel, UpdateDeviceType};
use crate::state_machine::DeviceStatus;

/// Collects field-level violations; `finish` turns them into one error.
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push(format!("{field}: {message}"));
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the report: Ok when clean, otherwise one `ValidationError`
    /// enumerating every violation.
    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FleetError::ValidationError(self.errors.join("; ")))
        }
    }
}

/// Validate a path identifier (device, model, or type id).
pub fn validate_entity_id(field: &str, id: i32) -> Result<()> {
    let mut report = ValidationReport::new();
    if id < 1 {
        report.add(field, "must be an integer greater than or equal to 1");
    }
    report.finish()
}

// ---------------------------------------------------------------------------
// Field extractors over raw JSON objects
// ---------------------------------------------------------------------------

/// Required identifier field: integer ≥ 1.
fn required_id(obj: &Map<String, Value>, field: &str, report: &mut ValidationReport) -> Option<i32> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            report.add(field, "is required");
            None
        }
        Some(value) => int_id(value, field, report),
    }
}

/// Optional identifier field: absent or null means "not supplied".
fn optional_id(obj: &Map<String, Value>, field: &str, report: &mut ValidationReport) -> Option<i32> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => int_id(value, field, report),
    }
}

fn int_id(value: &Value, field: &str, report: &mut ValidationReport) -> Option<i32> {
    let Some(id) = value.as_i64() else {
        report.add(field, "must be an integer");
        return None;
    };
    if id < 1 || id > i64::from(i32::MAX) {
        report.add(field, "must be an integer greater than or equal to 1");
        return None;
    }
    Some(id as i32)
}

/// Required non-empty string field.
fn required_string(
    obj: &Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            report.add(field, "is required");
            None
        }
        Some(value) => non_empty_string(value, field, report),
    }
}

/// Optional non-empty string field.
fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => non_empty_string(value, field, report),
    }
}

fn non_empty_string(value: &Value, field: &str, report: &mut ValidationReport) -> Option<String> {
    let Some(s) = value.as_str() else {
        report.add(field, "must be a string");
        return None;
    };
    if s.is_empty() {
        report.add(field, "must not be empty");
        return None;
    }
    Some(s.to_string())
}

/// Optional status field: absent or null means "not supplied".
fn optional_status(
    obj: &Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<DeviceStatus> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let Some(s) = value.as_str() else {
                report.add(field, "must be a string");
                return None;
            };
            match s.parse::<DeviceStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    report.add(field, "must be one of stock, installé, maintenance");
                    None
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request body parsers
// ---------------------------------------------------------------------------

/// Parse and validate a create-device body: `{modelId, mac, status?}`.
pub fn parse_new_device(body: &Value) -> Result<NewDevice> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let model_id = required_id(obj, "modelId", &mut report);
    let mac = required_string(obj, "mac", &mut report);
    let status = optional_status(obj, "status", &mut report);

    report.finish()?;
    match (model_id, mac) {
        (Some(model_id), Some(mac)) => Ok(NewDevice {
            model_id,
            mac,
            status,
        }),
        _ => Err(FleetError::ValidationError("invalid request body".to_string())),
    }
}

/// Parse and validate a modify-device body: any subset of `{mac, status}`.
pub fn parse_update_device(body: &Value) -> Result<UpdateDevice> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let mac = optional_string(obj, "mac", &mut report);
    let status = optional_status(obj, "status", &mut report);

    report.finish()?;
    Ok(UpdateDevice { mac, status })
}

/// Parse and validate a create-model body: `{name, typeId}`.
pub fn parse_new_device_model(body: &Value) -> Result<NewDeviceModel> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let name = required_string(obj, "name", &mut report);
    let type_id = required_id(obj, "typeId", &mut report);

    report.finish()?;
    match (name, type_id) {
        (Some(name), Some(type_id)) => Ok(NewDeviceModel { name, type_id }),
        _ => Err(FleetError::ValidationError("invalid request body".to_string())),
    }
}

/// Parse and validate a modify-model body: any subset of `{name, typeId}`.
pub fn parse_update_device_model(body: &Value) -> Result<UpdateDeviceModel> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let name = optional_string(obj, "name", &mut report);
    let type_id = optional_id(obj, "typeId", &mut report);

    report.finish()?;
    Ok(UpdateDeviceModel { name, type_id })
}

/// Parse and validate a create-type body: `{name}`.
pub fn parse_new_device_type(body: &Value) -> Result<NewDeviceType> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let name = required_string(obj, "name", &mut report);

    report.finish()?;
    match name {
        Some(name) => Ok(NewDeviceType { name }),
        None => Err(FleetError::ValidationError("invalid request body".to_string())),
    }
}

/// Parse and validate a modify-type body: `{name?}`.
pub fn parse_update_device_type(body: &Value) -> Result<UpdateDeviceType> {
    let Some(obj) = body.as_object() else {
        return Err(FleetError::ValidationError("body: must be a JSON object".to_string()));
    };
    let mut report = ValidationReport::new();

    let name = optional_string(obj, "name", &mut report);

    report.finish()?;
    Ok(UpdateDeviceType { name })
}

// ---------------------------------------------------------------------------
// Query parameter validation
// ---------------------------------------------------------------------------

/// Raw device list query parameters as they arrive on the wire.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(default)]
pub struct DeviceQueryParams {
    /// Exact-match filter on device status
    pub status: Option<String>,
    /// Case-insensitive substring filter on model name
    pub model: Option<String>,
    /// Case-insensitive substring filter on type name
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Case-insensitive substring filter on the device MAC
    pub mac: Option<String>,
}

/// Validated device list filters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceFilters {
    pub status: Option<DeviceStatus>,
    pub model: Option<String>,
    pub type_name: Option<String>,
    pub mac: Option<String>,
}

/// Validate device list query parameters. All filters are optional and
/// independently checked; violations are collected into one report.
pub fn parse_device_filters(params: &DeviceQueryParams) -> Result<DeviceFilters> {
    let mut report = ValidationReport::new();

    let status = match params.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<DeviceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                report.add("status", "must be one of stock, installé, maintenance");
                None
            }
        },
    };

    let model = checked_filter("model", params.model.as_deref(), &mut report);
    let type_name = checked_filter("type", params.type_name.as_deref(), &mut report);
    let mac = checked_filter("mac", params.mac.as_deref(), &mut report);

    report.finish()?;
    Ok(DeviceFilters {
        status,
        model,
        type_name,
        mac,
    })
}

/// Raw device model list query parameters.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(default)]
pub struct DeviceModelQueryParams {
    /// Case-insensitive substring filter on model name
    pub name: Option<String>,
    /// Case-insensitive substring filter on type name
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

/// Validated device model list filters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceModelFilters {
    pub name: Option<String>,
    pub type_name: Option<String>,
}

/// Validate device model list query parameters.
pub fn parse_device_model_filters(params: &DeviceModelQueryParams) -> Result<DeviceModelFilters> {
    let mut report = ValidationReport::new();

    let name = checked_filter("name", params.name.as_deref(), &mut report);
    let type_name = checked_filter("type", params.type_name.as_deref(), &mut report);

    report.finish()?;
    Ok(DeviceModelFilters { name, type_name })
}

/// Raw device type list query parameters.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(default)]
pub struct DeviceTypeQueryParams {
    /// Case-insensitive substring filter on type name
    pub name: Option<String>,
}

/// Validated device type list filters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceTypeFilters {
    pub name: Option<String>,
}

/// Validate device type list query parameters.
pub fn parse_device_type_filters(params: &DeviceTypeQueryParams) -> Result<DeviceTypeFilters> {
    let mut report = ValidationReport::new();

    let name = checked_filter("name", params.name.as_deref(), &mut report);

    report.finish()?;
    Ok(DeviceTypeFilters { name })
}

fn checked_filter(
    field: &str,
    value: Option<&str>,
    report: &mut ValidationReport,
) -> Option<String> {
    match value {
        None => None,
        Some("") => {
            report.add(field, "must not be empty");
            None
        }
        Some(s) => Some(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_new_device_happy_path() {
        let body = json!({"modelId": 1, "mac": "AA:BB:CC:DD:EE:01", "status": "stock"});
        let device = parse_new_device(&body).unwrap();
        assert_eq!(device.model_id, 1);
        assert_eq!(device.mac, "AA:BB:CC:DD:EE:01");
        assert_eq!(device.status, Some(DeviceStatus::Stock));
    }

    #[test]
    fn test_parse_new_device_status_optional() {
        let body = json!({"modelId": 3, "mac": "AA:BB:CC:DD:EE:02"});
        let device = parse_new_device(&body).unwrap();
        assert_eq!(device.status, None);
    }

    #[test]
    fn test_parse_new_device_collects_all_field_errors() {
        let body = json!({"modelId": 0, "status": "broken"});
        let err = parse_new_device(&body).unwrap_err();
        let FleetError::ValidationError(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(message.contains("modelId"), "missing modelId in: {message}");
        assert!(message.contains("mac"), "missing mac in: {message}");
        assert!(message.contains("status"), "missing status in: {message}");
    }

    #[test]
    fn test_parse_new_device_rejects_non_object_body() {
        assert!(parse_new_device(&json!([1, 2, 3])).is_err());
        assert!(parse_new_device(&json!("mac")).is_err());
    }

    #[test]
    fn test_parse_update_device_accepts_any_subset() {
        let both = parse_update_device(&json!({"mac": "FF:FF:FF:00:00:01", "status": "installé"}))
            .unwrap();
        assert_eq!(both.mac.as_deref(), Some("FF:FF:FF:00:00:01"));
        assert_eq!(both.status, Some(DeviceStatus::Installed));

        let empty = parse_update_device(&json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_update_device_null_means_absent() {
        let changes = parse_update_device(&json!({"mac": null, "status": null})).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_parse_update_device_rejects_empty_mac() {
        let err = parse_update_device(&json!({"mac": ""})).unwrap_err();
        assert!(matches!(err, FleetError::ValidationError(ref m) if m.contains("mac")));
    }

    #[test]
    fn test_parse_new_device_model_requires_both_fields() {
        let err = parse_new_device_model(&json!({})).unwrap_err();
        let FleetError::ValidationError(message) = err else {
            panic!("expected validation error");
        };
        assert!(message.contains("name"));
        assert!(message.contains("typeId"));

        let model = parse_new_device_model(&json!({"name": "ER-X", "typeId": 2})).unwrap();
        assert_eq!(model.name, "ER-X");
        assert_eq!(model.type_id, 2);
    }

    #[test]
    fn test_parse_new_device_type_requires_name() {
        assert!(parse_new_device_type(&json!({"name": ""})).is_err());
        let ty = parse_new_device_type(&json!({"name": "router"})).unwrap();
        assert_eq!(ty.name, "router");
    }

    #[test]
    fn test_validate_entity_id_bounds() {
        assert!(validate_entity_id("id", 1).is_ok());
        assert!(validate_entity_id("id", 42).is_ok());
        assert!(validate_entity_id("id", 0).is_err());
        assert!(validate_entity_id("id", -7).is_err());
    }

    #[test]
    fn test_parse_device_filters_happy_path() {
        let params = DeviceQueryParams {
            status: Some("stock".to_string()),
            model: Some("Edge".to_string()),
            type_name: Some("router".to_string()),
            mac: None,
        };
        let filters = parse_device_filters(&params).unwrap();
        assert_eq!(filters.status, Some(DeviceStatus::Stock));
        assert_eq!(filters.model.as_deref(), Some("Edge"));
        assert_eq!(filters.type_name.as_deref(), Some("router"));
        assert_eq!(filters.mac, None);
    }

    #[test]
    fn test_parse_device_filters_collects_all_errors() {
        let params = DeviceQueryParams {
            status: Some("broken".to_string()),
            model: Some(String::new()),
            type_name: None,
            mac: None,
        };
        let err = parse_device_filters(&params).unwrap_err();
        let FleetError::ValidationError(message) = err else {
            panic!("expected validation error");
        };
        assert!(message.contains("status"));
        assert!(message.contains("model"));
    }

    #[test]
    fn test_parse_model_and_type_filters() {
        let params = DeviceModelQueryParams {
            name: Some("ER".to_string()),
            type_name: Some("router".to_string()),
        };
        let filters = parse_device_model_filters(&params).unwrap();
        assert_eq!(filters.name.as_deref(), Some("ER"));

        let params = DeviceTypeQueryParams {
            name: Some(String::new()),
        };
        assert!(parse_device_type_filters(&params).is_err());
    }
}
