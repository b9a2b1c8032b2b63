//! # Validation Module
//!
//! Input validation for Tidal Market requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (market-api)                                    │
//! │  └── Type validation (JSON deserialization, decimal parsing)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository entry point (tidal-db)                            │
//! │  └── THIS MODULE: field rules, run before any store access             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (users.email)                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tidal_core::money::Weight;
//! use tidal_core::validation::{validate_email, validate_quantity};
//!
//! validate_email("a@b.com").unwrap();
//! validate_quantity(Weight::parse("5.0").unwrap()).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Weight};
use crate::types::{FishProductPatch, LoginRequest, NewFishProduct, NewOrder, ProductFilter, RegisterFisherman};
use crate::{MAX_FRACTION_DIGITS, MAX_PRODUCT_NAME_LEN, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only values.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain contains a dot that is neither first nor last
///
/// ## Example
/// ```rust
/// use tidal_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("a@b").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    Ok(())
}

/// Validates a new password.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    validate_required("name", name)?;

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn check_precision(field: &str, digits: u32) -> ValidationResult<()> {
    if digits > MAX_FRACTION_DIGITS {
        return Err(ValidationError::TooPrecise {
            field: field.to_string(),
            max: MAX_FRACTION_DIGITS,
        });
    }
    Ok(())
}

/// Validates a listing price: strictly positive, at most 2 decimals.
///
/// ## Example
/// ```rust
/// use tidal_core::money::Money;
/// use tidal_core::validation::validate_price;
///
/// assert!(validate_price(Money::parse("25.50").unwrap()).is_ok());
/// assert!(validate_price(Money::parse("0").unwrap()).is_err());
/// assert!(validate_price(Money::parse("1.999").unwrap()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price_per_kg".to_string(),
        });
    }
    check_precision("price_per_kg", price.fraction_digits())
}

/// Validates a stock level: zero or more, at most 2 decimals.
pub fn validate_stock(stock: Weight) -> ValidationResult<()> {
    if stock.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_kg".to_string(),
        });
    }
    check_precision("stock_kg", stock.fraction_digits())
}

/// Validates an order quantity: strictly positive, at most 2 decimals.
pub fn validate_quantity(quantity: Weight) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity_kg".to_string(),
        });
    }
    check_precision("quantity_kg", quantity.fraction_digits())
}

/// Validates a price filter bound.
pub fn validate_price_bound(field: &str, bound: Money) -> ValidationResult<()> {
    if bound.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a registration form.
pub fn validate_registration(input: &RegisterFisherman) -> ValidationResult<()> {
    validate_required("full_name", &input.full_name)?;
    validate_email(&input.email)?;
    validate_required("phone_number", &input.phone_number)?;
    validate_password(&input.password)?;
    validate_required("catch_location", &input.catch_location)
}

/// Login only checks presence; length rules apply at registration.
pub fn validate_login(input: &LoginRequest) -> ValidationResult<()> {
    validate_required("email", &input.email)?;
    if input.password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Validates a new product listing.
pub fn validate_new_product(input: &NewFishProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price(input.price_per_kg)?;
    validate_stock(input.stock_kg)
}

/// Validates each supplied field of a product patch.
pub fn validate_product_patch(patch: &FishProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(price) = patch.price_per_kg {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock_kg {
        validate_stock(stock)?;
    }
    Ok(())
}

/// Validates an order request.
pub fn validate_new_order(input: &NewOrder) -> ValidationResult<()> {
    validate_required("buyer_name", &input.buyer_name)?;
    validate_required("buyer_phone", &input.buyer_phone)?;
    validate_required("buyer_address", &input.buyer_address)?;
    validate_quantity(input.quantity_kg)
}

/// Validates product list filters.
pub fn validate_filter(filter: &ProductFilter) -> ValidationResult<()> {
    if let Some(min) = filter.min_price {
        validate_price_bound("min_price", min)?;
    }
    if let Some(max) = filter.max_price {
        validate_price_bound("max_price", max)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    fn registration() -> RegisterFisherman {
        RegisterFisherman {
            full_name: "Ana Reyes".to_string(),
            email: "a@b.com".to_string(),
            phone_number: "555-0101".to_string(),
            password: "secret1".to_string(),
            catch_location: "Bay".to_string(),
        }
    }

    fn order(quantity: &str) -> NewOrder {
        NewOrder {
            fish_product_id: 1,
            buyer_name: "Lee".to_string(),
            buyer_phone: "555-0199".to_string(),
            buyer_address: "1 Harbor Rd".to_string(),
            quantity_kg: Weight::parse(quantity).unwrap(),
            payment_method: PaymentMethod::CashOnPickup,
            notes: None,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(matches!(
            validate_password("12345"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(&registration()).is_ok());

        let mut input = registration();
        input.catch_location = "  ".to_string();
        assert!(matches!(
            validate_registration(&input),
            Err(ValidationError::Required { field }) if field == "catch_location"
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Yellowfin Tuna").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"a".repeat(200)).is_ok());
        assert!(validate_product_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price(Money::parse("0.01").unwrap()).is_ok());
        assert!(validate_price(Money::parse("-1").unwrap()).is_err());
        assert!(validate_price(Money::parse("25.505").unwrap()).is_err());
        // Trailing zeros are not extra precision.
        assert!(validate_price(Money::parse("25.5000").unwrap()).is_ok());

        assert!(validate_stock(Weight::zero()).is_ok());
        assert!(validate_stock(Weight::parse("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_new_order() {
        assert!(validate_new_order(&order("5.0")).is_ok());
        assert!(validate_new_order(&order("0")).is_err());
        assert!(validate_new_order(&order("-2")).is_err());

        let mut input = order("1");
        input.buyer_address = String::new();
        assert!(validate_new_order(&input).is_err());
    }

    #[test]
    fn test_validate_patch_checks_supplied_fields_only() {
        assert!(validate_product_patch(&FishProductPatch::default()).is_ok());

        let patch = FishProductPatch {
            price_per_kg: Some(Money::zero()),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_err());

        let patch = FishProductPatch {
            description: Some(None),
            stock_kg: Some(Weight::zero()),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_ok());
    }

    #[test]
    fn test_validate_filter() {
        assert!(validate_filter(&ProductFilter::new()).is_ok());
        let filter = ProductFilter::new().min_price(Money::parse("-1").unwrap());
        assert!(validate_filter(&filter).is_err());
    }
}
