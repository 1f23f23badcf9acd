//! Todo API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p todo-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use todo_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // The subscriber format depends on APP_ENV, read before the full config
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|s| Environment::parse(&s))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Todo API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    todo_api::run(config).await?;

    Ok(())
}
