//! Device fleet API server binary.

use anyhow::Context;
use tracing::info;

use device_fleet::config::Config;
use device_fleet::logging::init_structured_logging;
use device_fleet::web::{build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_structured_logging();

    let config = Config::from_env().context("failed to load configuration")?;
    let bind_address = config.bind_address.clone();

    let state = AppState::new(config)
        .await
        .context("failed to initialize application state")?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!(address = %bind_address, "device fleet API listening");
    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
