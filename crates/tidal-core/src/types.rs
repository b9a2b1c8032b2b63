//! # Domain Types
//!
//! Core domain types used throughout Tidal Market.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │   FishProduct   │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  fisherman_id   │◄──│  fish_product_id│       │
//! │  │  email (unique) │   │  price_per_kg   │   │  quantity_kg    │       │
//! │  │  role           │   │  stock_kg       │   │  total_price    │       │
//! │  └────────▲────────┘   │  is_active      │   │  status         │       │
//! │           │            └─────────────────┘   └─────────────────┘       │
//! │  ┌────────┴────────┐                                                    │
//! │  │FishermanProfile │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ─────────────  │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  user_id (1:1)  │   │  Pending        │   │  CashOnPickup   │       │
//! │  │  catch_location │   │  Confirmed      │   └─────────────────┘       │
//! │  └─────────────────┘   │  Completed      │                              │
//! │                        │  Cancelled      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entities are what the store returns; the `New*`, `*Patch` and
//! `ProductFilter` records are what callers send in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, Weight};

// =============================================================================
// User Role
// =============================================================================

/// What a user account may do. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Lists fish products and manages their orders.
    Fisherman,
    /// Places orders.
    Buyer,
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// `password_hash` never leaves the server: it is skipped on serialization
/// and absent from the generated TypeScript type.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    /// Unique across all users, matched case-sensitively at login.
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_fisherman(&self) -> bool {
        self.role == UserRole::Fisherman
    }
}

// =============================================================================
// Fisherman Profile
// =============================================================================

/// The 1:1 extension of a fisherman's User record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FishermanProfile {
    pub id: i64,
    pub user_id: i64,
    /// Where this fisherman usually lands the catch.
    pub catch_location: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Fish Product
// =============================================================================

/// A listing owned by exactly one fisherman.
///
/// ## Lifecycle
/// ```text
/// create (is_active = true)
///   │
///   ├──► patch by owner: name, description, price, stock, image, is_active
///   ├──► stock decremented by each placed order
///   │
///   ▼
/// soft delete (is_active = false; row kept for historical orders)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FishProduct {
    pub id: i64,
    pub fisherman_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Always greater than zero.
    #[ts(type = "string")]
    pub price_per_kg: Money,
    /// Never negative.
    #[ts(type = "string")]
    pub stock_kg: Weight,
    pub image_url: Option<String>,
    /// `false` once soft-deleted.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl FishProduct {
    /// Checks whether an order of `quantity` could be filled right now.
    pub fn can_fill(&self, quantity: Weight) -> bool {
        self.is_active && quantity <= self.stock_kg
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order stands.
///
/// ```text
/// Pending ──► Confirmed ──► Completed
///    │            │
///    └────────────┴──► Cancelled
/// ```
///
/// The arrows are the intended flow only. Status updates are not checked
/// against them; any status may be set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the buyer, not yet seen by the fisherman.
    #[default]
    Pending,
    /// Accepted by the fisherman.
    Confirmed,
    /// Picked up and paid.
    Completed,
    /// Withdrawn by either side.
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in flow order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Completed and cancelled orders are finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Buyer pays in cash when collecting the fish.
    #[default]
    CashOnPickup,
}

// =============================================================================
// Order
// =============================================================================

/// A buyer's order against one product.
/// Uses snapshot pattern: `total_price` is frozen at placement time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub fish_product_id: i64,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_address: String,
    #[ts(type = "string")]
    pub quantity_kg: Weight,
    /// quantity_kg × price_per_kg at the moment the order was placed.
    #[ts(type = "string")]
    pub total_price: Money,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Input Records
// =============================================================================

/// Registration form for a new fisherman account.
#[derive(Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterFisherman {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub catch_location: String,
}

impl fmt::Debug for RegisterFisherman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterFisherman")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .field("catch_location", &self.catch_location)
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A new product listing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewFishProduct {
    pub fisherman_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[ts(type = "string")]
    pub price_per_kg: Money,
    #[ts(type = "string")]
    pub stock_kg: Weight,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A partial update to a product. Only supplied fields change.
///
/// The nullable columns take three states:
///
/// | JSON                       | Rust                | Effect          |
/// |----------------------------|---------------------|-----------------|
/// | field missing              | `None`              | unchanged       |
/// | `"description": null`      | `Some(None)`        | cleared         |
/// | `"description": "Fresh"`   | `Some(Some("..."))` | set             |
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FishProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub price_per_kg: Option<Money>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub stock_kg: Option<Weight>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl FishProductPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_per_kg.is_none()
            && self.stock_kg.is_none()
            && self.image_url.is_none()
            && self.is_active.is_none()
    }
}

/// Maps a present JSON value (including `null`) to `Some(..)` so that a
/// missing field and an explicit null stay distinguishable.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A buyer's order request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub fish_product_id: i64,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_address: String,
    #[ts(type = "string")]
    pub quantity_kg: Weight,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Product Filter
// =============================================================================

/// Conjunctive filters for listing products. Every field is optional and an
/// empty filter matches every row, active or not.
///
/// ## Example
/// ```rust
/// use tidal_core::types::ProductFilter;
/// use tidal_core::money::Money;
///
/// let filter = ProductFilter::new()
///     .search("salmon")
///     .max_price(Money::parse("30").unwrap())
///     .active(true);
///
/// assert!(!filter.is_empty());
/// assert!(filter.matches_price(Money::parse("25.50").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub min_price: Option<Money>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub max_price: Option<Money>,
    #[serde(default)]
    pub fisherman_id: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn min_price(mut self, price: Money) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Money) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn fisherman(mut self, fisherman_id: i64) -> Self {
        self.fisherman_id = Some(fisherman_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// The trimmed search term, or `None` if absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// True when the filter narrows nothing.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.fisherman_id.is_none()
            && self.is_active.is_none()
    }

    /// Case-insensitive substring match on a product name, with full Unicode
    /// case folding (`"éperlan"` finds `"ÉPERLAN"`). No search term matches
    /// every name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.search_term()
            .map_or(true, |term| name.to_lowercase().contains(&term.to_lowercase()))
    }

    /// Checks a price against the inclusive `[min_price, max_price]` range.
    pub fn matches_price(&self, price: Money) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnPickup).unwrap(),
            "\"cash_on_pickup\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Fisherman).unwrap(),
            "\"fisherman\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
        assert!(serde_json::from_str::<OrderStatus>("\"shipped\"").is_err());
    }

    #[test]
    fn test_order_status_defaults_and_terminals() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        for status in OrderStatus::ALL {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            full_name: "Ana Reyes".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "555-0101".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            role: UserRole::Fisherman,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "fisherman");
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let login = LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        let debug = format!("{:?}", login);
        assert!(!debug.contains("secret1"));
        assert!(debug.contains("a@b.com"));
    }

    #[test]
    fn test_patch_distinguishes_missing_from_null() {
        let patch: FishProductPatch =
            serde_json::from_str(r#"{"price_per_kg": "30.75", "description": null}"#).unwrap();
        assert_eq!(patch.price_per_kg, Some(Money::parse("30.75").unwrap()));
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.image_url, None);
        assert_eq!(patch.name, None);
        assert!(!patch.is_empty());

        let empty: FishProductPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_new_order_defaults_to_cash_on_pickup() {
        let order: NewOrder = serde_json::from_str(
            r#"{
                "fish_product_id": 1,
                "buyer_name": "Lee",
                "buyer_phone": "555-0199",
                "buyer_address": "1 Harbor Rd",
                "quantity_kg": "5.0"
            }"#,
        )
        .unwrap();
        assert_eq!(order.payment_method, PaymentMethod::CashOnPickup);
        assert_eq!(order.notes, None);
    }

    #[test]
    fn test_product_filter_price_range() {
        let filter = ProductFilter::new()
            .min_price(Money::parse("10").unwrap())
            .max_price(Money::parse("20").unwrap());

        assert!(filter.matches_price(Money::parse("10.00").unwrap()));
        assert!(filter.matches_price(Money::parse("20").unwrap()));
        assert!(!filter.matches_price(Money::parse("9.99").unwrap()));
        assert!(!filter.matches_price(Money::parse("20.01").unwrap()));
        assert!(ProductFilter::new().matches_price(Money::parse("0.01").unwrap()));
    }

    #[test]
    fn test_blank_search_is_absent() {
        let filter = ProductFilter::new().search("   ");
        assert_eq!(filter.search_term(), None);
        assert!(filter.is_empty());

        let filter = ProductFilter::new().search(" Tuna ");
        assert_eq!(filter.search_term(), Some("Tuna"));
    }

    #[test]
    fn test_name_match_folds_unicode_case() {
        let filter = ProductFilter::new().search("éperlan");
        assert!(filter.matches_name("ÉPERLAN"));
        assert!(filter.matches_name("Éperlan fumé"));
        assert!(!filter.matches_name("Eperlan"));

        assert!(ProductFilter::new().search("TUNA").matches_name("Yellowfin tuna"));
        assert!(ProductFilter::new().matches_name("anything"));
    }

    #[test]
    fn test_can_fill() {
        let mut product = FishProduct {
            id: 1,
            fisherman_id: 1,
            name: "Tuna".to_string(),
            description: None,
            price_per_kg: Money::parse("25.50").unwrap(),
            stock_kg: Weight::parse("100.00").unwrap(),
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(product.can_fill(Weight::parse("100").unwrap()));
        assert!(!product.can_fill(Weight::parse("100.01").unwrap()));

        product.is_active = false;
        assert!(!product.can_fill(Weight::parse("1").unwrap()));
    }
}
