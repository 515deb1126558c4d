//! # Query Scopes
//!
//! Chainable scope builders for the read side of the API. Every filter is
//! pushed into the SQL query itself; nothing is fetched and filtered in
//! application memory. Device queries join device → device_model →
//! device_type with inner joins, so a device whose model or type reference
//! is broken never surfaces as partial data.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{Device, DeviceModel, DeviceModelView, DeviceType, DeviceView};
use crate::state_machine::DeviceStatus;

const DEVICE_SELECT: &str = "SELECT device.id AS device_id, device.mac, device.status, \
     device_model.id AS model_id, device_model.name AS model_name, \
     device_type.id AS type_id, device_type.name AS type_name \
     FROM device \
     INNER JOIN device_model ON device_model.id = device.model_id \
     INNER JOIN device_type ON device_type.id = device_model.type_id";

const MODEL_SELECT: &str = "SELECT device_model.id AS model_id, device_model.name AS model_name, \
     device_type.id AS type_id, device_type.name AS type_name \
     FROM device_model \
     INNER JOIN device_type ON device_type.id = device_model.type_id";

const TYPE_SELECT: &str = "SELECT id, name FROM device_type";

/// Escape LIKE wildcards in user input before wrapping it in `%`.
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Query builder for the denormalized device view
pub struct DeviceScope {
    query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
}

impl Device {
    /// Start building a scoped device query
    pub fn scope() -> DeviceScope {
        DeviceScope {
            query: QueryBuilder::new(DEVICE_SELECT),
            has_conditions: false,
        }
    }
}

impl DeviceScope {
    fn push_where_or_and(&mut self) {
        if self.has_conditions {
            self.query.push(" AND ");
        } else {
            self.query.push(" WHERE ");
            self.has_conditions = true;
        }
    }

    /// Scope: case-insensitive substring match on the device MAC
    pub fn mac_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("device.mac ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Scope: case-insensitive substring match on the model name
    pub fn model_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("device_model.name ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Scope: case-insensitive substring match on the type name
    pub fn type_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("device_type.name ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Scope: exact match on the device status
    pub fn with_status(mut self, status: DeviceStatus) -> Self {
        self.push_where_or_and();
        self.query.push("device.status = ");
        self.query.push_bind(status.to_string());
        self
    }

    /// Scope: a single device by identifier
    pub fn by_id(mut self, id: i32) -> Self {
        self.push_where_or_and();
        self.query.push("device.id = ");
        self.query.push_bind(id);
        self
    }

    /// Execute the query, returning all matching device views
    pub async fn all(mut self, pool: &PgPool) -> Result<Vec<DeviceView>, sqlx::Error> {
        self.query.push(" ORDER BY device.id");
        self.query
            .build_query_as::<DeviceView>()
            .fetch_all(pool)
            .await
    }

    /// Execute the query, returning the first matching device view
    pub async fn first(mut self, pool: &PgPool) -> Result<Option<DeviceView>, sqlx::Error> {
        self.query.push(" LIMIT 1");
        self.query
            .build_query_as::<DeviceView>()
            .fetch_optional(pool)
            .await
    }

    #[cfg(test)]
    pub(crate) fn sql(&self) -> &str {
        self.query.sql()
    }
}

/// Query builder for the device model view (one join level shallower)
pub struct DeviceModelScope {
    query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
}

impl DeviceModel {
    /// Start building a scoped device model query
    pub fn scope() -> DeviceModelScope {
        DeviceModelScope {
            query: QueryBuilder::new(MODEL_SELECT),
            has_conditions: false,
        }
    }
}

impl DeviceModelScope {
    fn push_where_or_and(&mut self) {
        if self.has_conditions {
            self.query.push(" AND ");
        } else {
            self.query.push(" WHERE ");
            self.has_conditions = true;
        }
    }

    /// Scope: case-insensitive substring match on the model name
    pub fn name_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("device_model.name ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Scope: case-insensitive substring match on the type name
    pub fn type_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("device_type.name ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Scope: a single model by identifier
    pub fn by_id(mut self, id: i32) -> Self {
        self.push_where_or_and();
        self.query.push("device_model.id = ");
        self.query.push_bind(id);
        self
    }

    /// Execute the query, returning all matching model views
    pub async fn all(mut self, pool: &PgPool) -> Result<Vec<DeviceModelView>, sqlx::Error> {
        self.query.push(" ORDER BY device_model.id");
        self.query
            .build_query_as::<DeviceModelView>()
            .fetch_all(pool)
            .await
    }

    /// Execute the query, returning the first matching model view
    pub async fn first(mut self, pool: &PgPool) -> Result<Option<DeviceModelView>, sqlx::Error> {
        self.query.push(" LIMIT 1");
        self.query
            .build_query_as::<DeviceModelView>()
            .fetch_optional(pool)
            .await
    }

    #[cfg(test)]
    pub(crate) fn sql(&self) -> &str {
        self.query.sql()
    }
}

/// Query builder for device type listings (no joins)
pub struct DeviceTypeScope {
    query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
}

impl DeviceType {
    /// Start building a scoped device type query
    pub fn scope() -> DeviceTypeScope {
        DeviceTypeScope {
            query: QueryBuilder::new(TYPE_SELECT),
            has_conditions: false,
        }
    }
}

impl DeviceTypeScope {
    fn push_where_or_and(&mut self) {
        if self.has_conditions {
            self.query.push(" AND ");
        } else {
            self.query.push(" WHERE ");
            self.has_conditions = true;
        }
    }

    /// Scope: case-insensitive substring match on the type name
    pub fn name_contains(mut self, fragment: &str) -> Self {
        self.push_where_or_and();
        self.query.push("name ILIKE ");
        self.query.push_bind(contains_pattern(fragment));
        self
    }

    /// Execute the query, returning all matching types
    pub async fn all(mut self, pool: &PgPool) -> Result<Vec<DeviceType>, sqlx::Error> {
        self.query.push(" ORDER BY id");
        self.query
            .build_query_as::<DeviceType>()
            .fetch_all(pool)
            .await
    }

    #[cfg(test)]
    pub(crate) fn sql(&self) -> &str {
        self.query.sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_scope_joins_all_three_tables() {
        let scope = Device::scope();
        let sql = scope.sql();
        assert!(sql.contains("INNER JOIN device_model ON device_model.id = device.model_id"));
        assert!(sql.contains("INNER JOIN device_type ON device_type.id = device_model.type_id"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_device_scope_filters_are_conjunctive() {
        let scope = Device::scope()
            .with_status(DeviceStatus::Stock)
            .type_contains("router")
            .mac_contains("aa:bb");
        let sql = scope.sql();

        assert!(sql.contains("WHERE device.status = $1"));
        assert!(sql.contains("AND device_type.name ILIKE $2"));
        assert!(sql.contains("AND device.mac ILIKE $3"));
    }

    #[test]
    fn test_device_scope_substring_filters_use_ilike() {
        let scope = Device::scope().model_contains("Edge");
        assert!(scope.sql().contains("device_model.name ILIKE $1"));
    }

    #[test]
    fn test_device_scope_status_filter_is_exact() {
        let scope = Device::scope().with_status(DeviceStatus::Installed);
        let sql = scope.sql();
        assert!(sql.contains("device.status = $1"));
        assert!(!sql.contains("status ILIKE"));
    }

    #[test]
    fn test_model_scope_joins_type_only() {
        let scope = DeviceModel::scope().name_contains("ER-X").type_contains("router");
        let sql = scope.sql();
        assert!(sql.contains("INNER JOIN device_type ON device_type.id = device_model.type_id"));
        assert!(!sql.contains("FROM device "));
        assert!(sql.contains("WHERE device_model.name ILIKE $1"));
        assert!(sql.contains("AND device_type.name ILIKE $2"));
    }

    #[test]
    fn test_type_scope_is_flat() {
        let scope = DeviceType::scope().name_contains("switch");
        let sql = scope.sql();
        assert!(sql.starts_with("SELECT id, name FROM device_type"));
        assert!(sql.contains("WHERE name ILIKE $1"));
    }

    #[test]
    fn test_contains_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("a%b"), "%a\\%b%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("plain"), "%plain%");
    }
}
