//! HTTP server for the hours planner.

use std::env;

use hours_planner::api::{AppState, create_router};
use hours_planner::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the configuration directory.
const CONFIG_DIR_VAR: &str = "PLANNER_CONFIG_DIR";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "./config".to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    let bind_address = loader.config().server.bind_address.clone();
    info!(
        config_dir = %config_dir,
        max_attempts = loader.config().allocation.max_attempts,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Hours planner listening");
    axum::serve(listener, app).await?;

    Ok(())
}
