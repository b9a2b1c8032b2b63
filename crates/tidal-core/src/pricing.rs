//! # Pricing & Stock Rules
//!
//! The checks that gate order placement and product ownership.
//!
//! ## Order Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote_order(product, quantity_kg)                                     │
//! │                                                                         │
//! │  1. product.is_active?          no ──► InactiveProduct                  │
//! │  2. quantity_kg <= stock_kg?    no ──► InsufficientStock                │
//! │  3. total_price    = quantity_kg × price_per_kg                         │
//! │     remaining_stock = stock_kg − quantity_kg                            │
//! │                                                                         │
//! │  The caller (tidal-db) runs this INSIDE the placement transaction,     │
//! │  against the product row it just read.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Weight};
use crate::types::{FishProduct, User};

/// The priced outcome of a valid order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuote {
    /// Snapshot price stored on the order.
    pub total_price: Money,
    /// What the product's stock becomes once the order is placed.
    pub remaining_stock: Weight,
}

/// Prices an order of `quantity` against `product` as it is right now.
///
/// An inactive product is rejected regardless of stock. Ordering exactly
/// the remaining stock succeeds and leaves zero.
///
/// ## Example
/// ```rust
/// # use chrono::Utc;
/// use tidal_core::money::{Money, Weight};
/// use tidal_core::pricing::quote_order;
/// use tidal_core::types::FishProduct;
///
/// # let product = FishProduct {
/// #     id: 1, fisherman_id: 1, name: "Tuna".into(), description: None,
/// #     price_per_kg: Money::parse("25.50").unwrap(),
/// #     stock_kg: Weight::parse("100.00").unwrap(),
/// #     image_url: None, is_active: true,
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// let quote = quote_order(&product, Weight::parse("5.0").unwrap()).unwrap();
/// assert_eq!(quote.total_price, Money::parse("127.50").unwrap());
/// assert_eq!(quote.remaining_stock, Weight::parse("95.00").unwrap());
/// ```
pub fn quote_order(product: &FishProduct, quantity: Weight) -> CoreResult<OrderQuote> {
    if !product.is_active {
        return Err(CoreError::InactiveProduct(product.id));
    }

    let remaining_stock =
        product
            .stock_kg
            .checked_sub(quantity)
            .ok_or(CoreError::InsufficientStock {
                product_id: product.id,
                available: product.stock_kg,
                requested: quantity,
            })?;

    let total_price = product
        .price_per_kg
        .checked_mul_weight(quantity)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "quantity_kg".to_string(),
            reason: "total price out of range".to_string(),
        })?;

    Ok(OrderQuote {
        total_price: total_price.normalized(),
        remaining_stock: remaining_stock.normalized(),
    })
}

/// Checks that `user_id` resolved to an account with the fisherman role.
///
/// `user` is the lookup result for `user_id`; `None` means no such user.
pub fn ensure_fisherman(user_id: i64, user: Option<&User>) -> CoreResult<()> {
    match user {
        Some(user) if user.is_fisherman() => Ok(()),
        _ => Err(CoreError::InvalidOwner(user_id)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRole;
    use chrono::Utc;

    fn product(price: &str, stock: &str, is_active: bool) -> FishProduct {
        FishProduct {
            id: 42,
            fisherman_id: 1,
            name: "Red Snapper".to_string(),
            description: None,
            price_per_kg: Money::parse(price).unwrap(),
            stock_kg: Weight::parse(stock).unwrap(),
            image_url: None,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn kg(s: &str) -> Weight {
        Weight::parse(s).unwrap()
    }

    #[test]
    fn test_quote_basic() {
        let quote = quote_order(&product("25.50", "100.00", true), kg("5.0")).unwrap();
        assert_eq!(quote.total_price, Money::parse("127.50").unwrap());
        assert_eq!(quote.remaining_stock, kg("95.00"));
        assert_eq!(quote.total_price.to_string(), "127.50");
        assert_eq!(quote.remaining_stock.to_string(), "95.00");
    }

    #[test]
    fn test_quote_exact_stock_leaves_zero() {
        let quote = quote_order(&product("12.00", "7.25", true), kg("7.25")).unwrap();
        assert!(quote.remaining_stock.is_zero());
        assert_eq!(quote.total_price, Money::parse("87.00").unwrap());
    }

    #[test]
    fn test_quote_insufficient_stock() {
        let err = quote_order(&product("25.50", "100.00", true), kg("150.0")).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => {
                assert_eq!(product_id, 42);
                assert_eq!(available, kg("100"));
                assert_eq!(requested, kg("150"));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_inactive_wins_over_stock() {
        let err = quote_order(&product("25.50", "100.00", false), kg("1")).unwrap_err();
        assert!(matches!(err, CoreError::InactiveProduct(42)));

        // Inactive AND short on stock still reports inactive.
        let err = quote_order(&product("25.50", "0", false), kg("1")).unwrap_err();
        assert!(matches!(err, CoreError::InactiveProduct(42)));
    }

    #[test]
    fn test_quote_fractional_weights_are_exact() {
        let quote = quote_order(&product("19.99", "3.30", true), kg("1.10")).unwrap();
        assert_eq!(quote.total_price, Money::parse("21.989").unwrap());
        assert_eq!(quote.remaining_stock, kg("2.2"));
    }

    #[test]
    fn test_ensure_fisherman() {
        let mut user = User {
            id: 9,
            full_name: "Ana Reyes".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "555-0101".to_string(),
            password_hash: String::new(),
            role: UserRole::Fisherman,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(ensure_fisherman(9, Some(&user)).is_ok());

        user.role = UserRole::Buyer;
        assert!(matches!(
            ensure_fisherman(9, Some(&user)),
            Err(CoreError::InvalidOwner(9))
        ));
        assert!(matches!(
            ensure_fisherman(404, None),
            Err(CoreError::InvalidOwner(404))
        ));
    }
}
