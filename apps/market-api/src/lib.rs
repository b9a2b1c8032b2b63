//! # Tidal Market API
//!
//! HTTP/JSON surface over the marketplace store.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum Router ── extractors (Json, Path, Query) ── 400/422 on bad shape  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::* handler(State<AppState>)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tidal-db repository ──► DbError ──► ApiError ──► { code, message }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<T> (201 for creates, 200 otherwise)                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;

use std::future::Future;

use axum::Router;
use tidal_db::Database;
use tokio::net::TcpListener;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};

/// State shared by every handler.
///
/// The database handle is cheap to clone (the pool is reference counted),
/// so axum clones this per request.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    routes::router().with_state(state)
}

/// Serves the application on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
