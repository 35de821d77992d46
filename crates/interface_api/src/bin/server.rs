//! Export Docs Core - API Server Binary
//!
//! Starts the HTTP API server for the export documentation system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin exportdocs-api
//!
//! # Run with environment variables
//! EXPORTDOCS_HOST=0.0.0.0 EXPORTDOCS_PORT=8080 cargo run --bin exportdocs-api
//! ```
//!
//! # Environment Variables
//!
//! * `EXPORTDOCS_HOST` - Server host (default: 0.0.0.0)
//! * `EXPORTDOCS_PORT` - Server port (default: 8080)
//! * `EXPORTDOCS_DATABASE_URL` - SQLite connection string
//! * `EXPORTDOCS_OUTPUT_DIR` - Directory rendered documents are written to
//! * `EXPORTDOCS_LOG_LEVEL` - Log level: trace, debug, info, warn, error
//! * `EXPORTDOCS_IGST_RATE` / `EXPORTDOCS_DRAWBACK_RATE` /
//!   `EXPORTDOCS_RODTEP_RATE` - Incentive rates as decimals

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, init_schema, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Export Docs Core API Server"
    );

    let pool = create_pool(&DatabaseConfig::new(&config.database_url)).await?;
    init_schema(&pool).await?;
    tracing::info!("Database ready");

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(pool, config)?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can complete
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
