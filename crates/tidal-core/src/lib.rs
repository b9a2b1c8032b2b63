//! # tidal-core: Pure Business Logic for Tidal Market
//!
//! This crate holds the marketplace rules as pure functions with zero I/O
//! dependencies: what a fisherman, a product and an order look like, how an
//! order is priced, and which inputs are acceptable.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tidal Market Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    market-api (axum)                            │   │
//! │  │    register, login, products, orders, status updates            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tidal-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   quote   │  │   rules   │  │   │
//! │  │   │   Order   │  │  Weight   │  │  orders   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tidal-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, FishProduct, Order, inputs and filters)
//! - [`money`] - `Money` and `Weight` with exact decimal arithmetic
//! - [`pricing`] - Order quoting: active check, stock check, total price
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tidal_core::money::{Money, Weight};
//!
//! let price = Money::parse("25.50").unwrap();
//! let quantity = Weight::parse("5.0").unwrap();
//!
//! assert_eq!(price * quantity, Money::parse("127.50").unwrap());
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Weight};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum fractional digits accepted for prices and weights.
///
/// Prices are quoted to the cent and stock is weighed to 10 grams, so two
/// digits is what a listing or an order may carry.
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum product name length.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
