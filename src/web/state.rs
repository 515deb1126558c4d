//! # Web API Application State
//!
//! Shared state for the web API: the configuration object built at startup
//! and the PostgreSQL connection pool. Handlers suspend only at persistence
//! calls on this pool; there is no other shared mutable state.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::web::errors::{ApiError, ApiResult};

const POOL_MAX_CONNECTIONS: u32 = 10;
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
}

impl AppState {
    /// Create application state with an eagerly connected pool.
    pub async fn new(config: Config) -> ApiResult<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
            .connect(&config.database_url)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to create database pool: {e}")))?;

        info!(
            max_connections = POOL_MAX_CONNECTIONS,
            "database pool created"
        );

        Ok(Self {
            config: Arc::new(config),
            db_pool,
        })
    }

    /// Create application state with a lazily connected pool.
    ///
    /// No connection is attempted until the first query, which lets the
    /// router be exercised without a running database.
    pub fn new_lazy(config: Config) -> ApiResult<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
            .connect_lazy(&config.database_url)
            .map_err(|e| ApiError::internal(format!("Invalid database URL: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            db_pool,
        })
    }
}
