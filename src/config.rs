//! Process configuration.
//!
//! Built once at startup from the environment and passed by reference into
//! every component that needs it. `DATABASE_URL` and `API_KEYS` are required;
//! missing values are a fatal startup error, never a runtime one.

use std::env;

use crate::error::{FleetError, Result};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allow-list of accepted `X-API-KEY` values.
    pub api_keys: Vec<String>,
    /// Address the HTTP server binds to.
    pub bind_address: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            FleetError::ConfigurationError("environment variable DATABASE_URL is missing".to_string())
        })?;

        let raw_keys = env::var("API_KEYS").map_err(|_| {
            FleetError::ConfigurationError("environment variable API_KEYS is missing".to_string())
        })?;

        let api_keys = parse_api_keys(&raw_keys);
        if api_keys.is_empty() {
            return Err(FleetError::ConfigurationError(
                "API_KEYS must contain at least one non-empty key".to_string(),
            ));
        }

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            database_url,
            api_keys,
            bind_address,
        })
    }

    /// Check a presented API key against the allow-list.
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.api_keys.iter().any(|allowed| allowed == key)
    }
}

/// Split a comma-separated allow-list, dropping empty entries.
fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}
