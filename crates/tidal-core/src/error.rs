//! # Error Types
//!
//! Domain-specific error types for tidal-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tidal-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tidal-db errors (separate crate)                                      │
//! │  └── DbError          - Store failures, NotFound, wraps CoreError      │
//! │                                                                         │
//! │  market-api errors                                                     │
//! │  └── ApiError         - What HTTP clients see (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Weight;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections.
///
/// Every variant is a recoverable condition the caller can act on; none of
/// them is retried internally.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The given id does not name a user with the fisherman role.
    ///
    /// ## When This Occurs
    /// - Creating a product for an unknown user id
    /// - Creating a product for a buyer account
    #[error("User {0} is not a fisherman")]
    InvalidOwner(i64),

    /// The product was soft-deleted and no longer takes orders.
    #[error("Fish product {0} is not active")]
    InactiveProduct(i64),

    /// The order asks for more than the product has in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Buyer orders 150 kg
    ///      │
    ///      ▼
    /// Check stock: available = 100 kg
    ///      │
    ///      ▼
    /// InsufficientStock { product_id, available: 100, requested: 150 }
    ///      │
    ///      ▼
    /// Client shows: "Only 100 kg left"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available} kg, requested {requested} kg")]
    InsufficientStock {
        product_id: i64,
        available: Weight,
        requested: Weight,
    },

    /// An account with this email already exists.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a request record doesn't meet the input rules, before
/// any store access happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value carries more fractional digits than the store keeps.
    #[error("{field} must have at most {max} decimal places")]
    TooPrecise { field: String, max: u32 },

    /// Invalid format (e.g., malformed email, unparsable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
