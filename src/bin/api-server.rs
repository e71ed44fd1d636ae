//! FX checklist API server
//!
//! Stateless HTTP API over the signal pipeline: health, metrics, analysis,
//! signal and zone endpoints. Can be horizontally scaled.

use fxchecklist::config::Config;
use fxchecklist::core::http::start_server;
use fxchecklist::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loads .env as well
    let config = Config::from_env()?;

    logging::init_logging();

    let port = config.port;
    info!("Starting FX checklist API server");
    info!(environment = %config.environment, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
