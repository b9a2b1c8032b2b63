//! # Tidal Market API
//!
//! HTTP/JSON server for the fish marketplace.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Market API Server                                │
//! │                                                                         │
//! │  Fishermen / Buyers ───► HTTP (2022) ───► Routes ───► SQLite           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`tidal_api::ApiConfig`]; everything comes from the environment.
//! Log verbosity follows `RUST_LOG`.

use tidal_api::{ApiConfig, AppState};
use tidal_db::Database;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Tidal Market API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.bind_address(),
        db_path = %config.db_path.display(),
        max_connections = config.db_max_connections,
        "Configuration loaded"
    );

    // Open the store (migrations run on connect)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    tidal_api::serve(listener, AppState::new(db.clone()), shutdown_signal()).await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// Log level can be controlled via `RUST_LOG` environment variable:
/// ```bash
/// RUST_LOG=debug market-api
/// RUST_LOG=tidal_db=trace market-api
/// ```
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tidal=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
