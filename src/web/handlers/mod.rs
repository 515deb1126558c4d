//! # Web API Request Handlers
//!
//! HTTP request handlers organized by entity. Each handler validates its
//! input, delegates to the data layer, and returns either a view or the
//! affected identifier.

use serde::Serialize;
use utoipa::ToSchema;

pub mod device_models;
pub mod device_types;
pub mod devices;
pub mod health;

/// Response for successful mutations: the created, modified, or deleted
/// identifier.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdResponse {
    pub id: i32,
}
