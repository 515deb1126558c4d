//! # Structured Logging Module
//!
//! Environment-aware structured logging for request handling and persistence
//! operations. Log level is controlled through `RUST_LOG`.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging. Safe to call more than once.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // Don't panic if a subscriber is already installed (tests).
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_filter(filter),
            )
            .try_init();
    });
}
