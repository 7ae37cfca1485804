//! Nearby API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p nearby-api
//! ```
//!
//! Configuration is loaded from `config/*.toml` and `NEARBY__*` environment
//! variables. Without `DATABASE_URL` the server keeps its data in memory.

use nearby_common::{try_init_tracing, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    let tracing_config = TracingConfig::for_environment(Environment::from_env());
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Nearby API Server...");

    let config = AppConfig::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    nearby_api::run(config).await?;

    Ok(())
}
