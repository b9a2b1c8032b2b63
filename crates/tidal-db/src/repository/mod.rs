//! # Repository Module
//!
//! Database repository implementations for Tidal Market.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().place(&new_order)                                 │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── validate input             (tidal-core::validation)               │
//! │  ├── BEGIN                                                             │
//! │  ├── read product row                                                  │
//! │  ├── quote_order                (tidal-core::pricing)                  │
//! │  ├── INSERT order / UPDATE stock                                       │
//! │  └── COMMIT                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository validates its inputs before touching the store and
//! returns domain types, never rows.
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Registration, login, profiles
//! - [`product::ProductRepository`] - Listing CRUD and filtered queries
//! - [`order::OrderRepository`] - Order placement and status updates

pub mod order;
pub mod product;
pub mod user;
