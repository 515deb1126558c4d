use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FleetError {
    DatabaseError(String),
    StateTransitionError(String),
    ValidationError(String),
    ConfigurationError(String),
    NotFound(String),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            FleetError::StateTransitionError(msg) => write!(f, "State transition error: {msg}"),
            FleetError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            FleetError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            FleetError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for FleetError {}

impl From<sqlx::Error> for FleetError {
    fn from(err: sqlx::Error) -> Self {
        FleetError::DatabaseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;
