#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Device Fleet
//!
//! A management API for network devices, their models, and device types.
//! Devices are tracked by MAC address and move through a fixed operational
//! lifecycle: `stock` → `installé` → `maintenance` → `stock`, with
//! self-transitions allowed and skips against the cycle rejected.
//!
//! ## Module Organization
//!
//! - [`models`] - Entity structs and sqlx-backed CRUD operations
//! - [`scopes`] - Chainable query builders that push filters into SQL
//! - [`state_machine`] - The device status lifecycle and transition check
//! - [`validation`] - Collect-all-errors parsing of external input
//! - [`web`] - axum router, handlers, auth middleware, error mapping
//! - [`config`] - Environment-derived configuration object
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use device_fleet::config::Config;
//! use device_fleet::web::{build_router, state::AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let state = AppState::new(config).await?;
//! let router = build_router(state);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scopes;
pub mod state_machine;
pub mod validation;
pub mod web;
