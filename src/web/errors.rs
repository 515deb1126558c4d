//! # API Error Handling
//!
//! Maps core failures to HTTP responses. Every error body has the shape
//! `{status, message}`; unexpected failures are logged with their detail and
//! surface as a generic 500 so internals never leak past the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::error::FleetError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more field-level validation failures, or a rejected status
    /// transition.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid API key.
    #[error("Unauthorized")]
    Unauthorized,

    /// Identifier does not resolve to an existing row.
    #[error("{0}")]
    NotFound(String),

    /// Delete blocked because other rows still reference the target.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected persistence or configuration failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Human-readable failure description
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Internal(detail) => {
                error!(detail = %detail, "internal error reached the request boundary");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::ValidationError(msg) | FleetError::StateTransitionError(msg) => {
                Self::BadRequest(msg)
            }
            FleetError::NotFound(msg) => Self::NotFound(msg),
            FleetError::DatabaseError(msg) | FleetError::ConfigurationError(msg) => {
                Self::Internal(msg)
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::bad_request("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("in use").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transition_error_maps_to_bad_request_with_message() {
        let err: ApiError = FleetError::StateTransitionError(
            "Cannot change status from stock to maintenance".to_string(),
        )
        .into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Cannot change status from stock to maintenance"
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            status: 404,
            message: "Not found".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": 404, "message": "Not found"}));
    }
}
