//! # Money and Weight
//!
//! Exact decimal quantities for prices (`Money`) and fish weights (`Weight`).
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    100.00 kg - 0.10 kg (× 3 orders) = 99.69999999999999  ❌ WRONG!     │
//! │                                                                         │
//! │  Fish is sold by weight, so neither side is a whole number:            │
//! │    25.50 /kg × 4.75 kg = 121.125                                       │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    Multiplication and subtraction are exact, nothing is rounded,       │
//! │    and repeated stock decrements never drift.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tidal_core::money::{Money, Weight};
//!
//! let price = Money::parse("25.50").unwrap();   // per kg
//! let stock = Weight::parse("100.00").unwrap();
//! let ordered = Weight::parse("5.0").unwrap();
//!
//! assert_eq!(price * ordered, Money::parse("127.5").unwrap());
//! assert_eq!(stock - ordered, Weight::parse("95").unwrap());
//! ```
//!
//! Both types serialize as JSON strings (`"25.50"`) so no client ever
//! round-trips them through a float.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Sub};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount, exact to any number of decimal places.
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  FishProduct.price_per_kg ──► quote_order() ──► Order.total_price       │
/// │                                    ▲                                    │
/// │                    NewOrder.quantity_kg (Weight)                        │
/// │                                                                         │
/// │  total_price is a SNAPSHOT: later price edits never touch it           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Parses a decimal string such as `"25.50"`.
    ///
    /// ## Example
    /// ```rust
    /// use tidal_core::money::Money;
    ///
    /// let price = Money::parse("30.75").unwrap();
    /// assert_eq!(price.to_string(), "30.75");
    /// assert!(Money::parse("thirty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s.trim()).map(Money)
    }

    /// Returns the inner decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Number of significant fractional digits (`25.50` has 1, `25.55` has 2).
    #[inline]
    pub fn fraction_digits(&self) -> u32 {
        self.0.normalize().scale()
    }

    /// Drops trailing zeros beyond the cents: `127.500` becomes `127.50`,
    /// `0.1999` stays as is.
    ///
    /// ## Example
    /// ```rust
    /// use tidal_core::money::Money;
    ///
    /// assert_eq!(Money::parse("127.500").unwrap().normalized().to_string(), "127.50");
    /// assert_eq!(Money::parse("95").unwrap().normalized().to_string(), "95.00");
    /// ```
    pub fn normalized(&self) -> Money {
        Money(normalize_to_hundredths(self.0))
    }

    /// Prices a weight of fish at this per-kg price.
    ///
    /// Returns `None` only if the product overflows the decimal range
    /// (about 7.9 × 10²⁸), which no real listing reaches.
    ///
    /// ## Example
    /// ```rust
    /// use tidal_core::money::{Money, Weight};
    ///
    /// let price = Money::parse("25.50").unwrap();
    /// let total = price.checked_mul_weight(Weight::parse("4.75").unwrap());
    /// assert_eq!(total, Some(Money::parse("121.125").unwrap()));
    /// ```
    pub fn checked_mul_weight(&self, weight: Weight) -> Option<Money> {
        self.0.checked_mul(weight.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Price per kg × weight = total price.
///
/// Panics on decimal overflow; use [`Money::checked_mul_weight`] where the
/// operands come from user input.
impl Mul<Weight> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, weight: Weight) -> Money {
        Money(self.0 * weight.0)
    }
}

// =============================================================================
// Weight Type
// =============================================================================

/// A weight of fish in kilograms.
///
/// Used for `stock_kg` on products and `quantity_kg` on orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    /// Wraps a decimal number of kilograms.
    #[inline]
    pub const fn from_kg(kg: Decimal) -> Self {
        Weight(kg)
    }

    /// Parses a decimal string such as `"100.00"`.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s.trim()).map(Weight)
    }

    /// Returns the number of kilograms.
    #[inline]
    pub const fn kg(&self) -> Decimal {
        self.0
    }

    /// Returns zero kilograms.
    #[inline]
    pub const fn zero() -> Self {
        Weight(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Number of significant fractional digits.
    #[inline]
    pub fn fraction_digits(&self) -> u32 {
        self.0.normalize().scale()
    }

    /// Same rule as [`Money::normalized`]: at least two decimal places,
    /// no trailing zeros past them.
    pub fn normalized(&self) -> Weight {
        Weight(normalize_to_hundredths(self.0))
    }

    /// Subtracts, returning `None` if the result would fall below zero.
    ///
    /// ## Example
    /// ```rust
    /// use tidal_core::money::Weight;
    ///
    /// let stock = Weight::parse("100.00").unwrap();
    /// assert_eq!(
    ///     stock.checked_sub(Weight::parse("100").unwrap()),
    ///     Some(Weight::zero())
    /// );
    /// assert_eq!(stock.checked_sub(Weight::parse("150").unwrap()), None);
    /// ```
    pub fn checked_sub(&self, other: Weight) -> Option<Weight> {
        let remaining = self.0.checked_sub(other.0)?;
        if remaining < Decimal::ZERO {
            None
        } else {
            Some(Weight(remaining))
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::zero()
    }
}

impl FromStr for Weight {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weight::parse(s)
    }
}

impl From<Decimal> for Weight {
    fn from(kg: Decimal) -> Self {
        Weight(kg)
    }
}

impl Sub for Weight {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Weight(self.0 - other.0)
    }
}

fn normalize_to_hundredths(value: Decimal) -> Decimal {
    let mut value = value.normalize();
    if value.scale() < 2 {
        value.rescale(2);
    }
    value
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn kg(s: &str) -> Weight {
        Weight::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display_keep_scale() {
        assert_eq!(money("25.50").to_string(), "25.50");
        assert_eq!(kg("100.00").to_string(), "100.00");
        assert_eq!(money(" 7 ").to_string(), "7");
        assert!(Money::parse("").is_err());
        assert!(Weight::parse("1,5").is_err());
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        assert_eq!(money("127.50"), money("127.500"));
        assert_eq!(kg("95"), kg("95.00"));
    }

    #[test]
    fn test_price_times_weight_is_exact() {
        assert_eq!(money("25.50") * kg("5.0"), money("127.50"));
        assert_eq!(money("0.10") * kg("3"), money("0.30"));
        assert_eq!(money("19.99") * kg("0.01"), money("0.1999"));
    }

    #[test]
    fn test_repeated_decrements_do_not_drift() {
        let mut stock = kg("100.00");
        for _ in 0..1000 {
            stock = stock - kg("0.10");
        }
        assert_eq!(stock, Weight::zero());
    }

    #[test]
    fn test_checked_sub_refuses_negative() {
        assert_eq!(kg("10").checked_sub(kg("10.00")), Some(Weight::zero()));
        assert_eq!(kg("10").checked_sub(kg("10.01")), None);
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(money("25.50").fraction_digits(), 1);
        assert_eq!(money("25.55").fraction_digits(), 2);
        assert_eq!(money("25.555").fraction_digits(), 3);
        assert_eq!(kg("100.00").fraction_digits(), 0);
    }

    #[test]
    fn test_normalized_keeps_cents() {
        assert_eq!(money("127.500").normalized().to_string(), "127.50");
        assert_eq!(money("121.125").normalized().to_string(), "121.125");
        assert_eq!(kg("95").normalized().to_string(), "95.00");
        assert_eq!(kg("0.000").normalized().to_string(), "0.00");
    }

    #[test]
    fn test_sign_checks() {
        assert!(money("0.01").is_positive());
        assert!(!Money::zero().is_positive());
        assert!(money("-1").is_negative());
        assert!(kg("0.00").is_zero());
        assert!(!kg("0").is_positive());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&money("25.50")).unwrap();
        assert_eq!(json, "\"25.50\"");

        let parsed: Weight = serde_json::from_str("\"4.75\"").unwrap();
        assert_eq!(parsed, kg("4.75"));
    }
}
