//! Route table.
//!
//! ```text
//! GET    /health
//! POST   /api/fishermen                  register
//! POST   /api/login                      login
//! GET    /api/fishermen/{id}/products    fisherman's listings, newest first
//! GET    /api/fishermen/{id}/orders      fisherman's orders, ?status=
//! GET    /api/products                   ?search&min_price&max_price&fisherman_id&is_active
//! POST   /api/products
//! GET    /api/products/{id}
//! PATCH  /api/products/{id}
//! DELETE /api/products/{id}              soft delete
//! POST   /api/orders
//! GET    /api/orders/{id}
//! PATCH  /api/orders/{id}/status
//! ```

pub mod accounts;
pub mod health;
pub mod orders;
pub mod products;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Accounts
        .route("/api/fishermen", post(accounts::register))
        .route("/api/login", post(accounts::login))
        // Products
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::soft_delete),
        )
        .route(
            "/api/fishermen/{id}/products",
            get(products::list_for_fisherman),
        )
        // Orders
        .route("/api/orders", post(orders::place))
        .route("/api/orders/{id}", get(orders::get))
        .route("/api/orders/{id}/status", patch(orders::update_status))
        .route("/api/fishermen/{id}/orders", get(orders::list_for_fisherman))
}
