//! # Row Models
//!
//! Structs that mirror table rows exactly, and their conversion into the
//! domain types of tidal-core.
//!
//! ```text
//! SQLite row ──FromRow──► FishProductRow ──TryFrom──► FishProduct
//!                         (decimals as TEXT)          (Money / Weight)
//! ```
//!
//! Decimal columns come back as `String` and are parsed here, so a value
//! that somehow is not a decimal surfaces as `DbError::CorruptRow` instead
//! of a silent zero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tidal_core::{
    FishProduct, FishermanProfile, Money, Order, OrderStatus, PaymentMethod, User, UserRole,
    Weight,
};

use crate::error::{DbError, DbResult};

/// Formats a timestamp the way every `*_at` column stores it.
///
/// Fixed width with microseconds and a `Z` suffix, so that comparing two
/// stored values as text gives the same answer as comparing the instants.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Current time formatted for storage.
pub fn now() -> String {
    timestamp(Utc::now())
}

fn decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw).map_err(|_| DbError::corrupt(column, raw))
}

// =============================================================================
// users
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone_number: row.phone_number,
            password_hash: row.password_hash,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// fishermen_profiles
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub user_id: i64,
    pub catch_location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for FishermanProfile {
    fn from(row: ProfileRow) -> Self {
        FishermanProfile {
            id: row.id,
            user_id: row.user_id,
            catch_location: row.catch_location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// fish_products
// =============================================================================

/// Column list shared by every product SELECT / RETURNING.
pub const PRODUCT_COLUMNS: &str = "id, fisherman_id, name, description, price_per_kg, stock_kg, \
     image_url, is_active, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FishProductRow {
    pub id: i64,
    pub fisherman_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_per_kg: String,
    /// Kept verbatim: the order placement guard compares against it.
    pub stock_kg: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FishProductRow> for FishProduct {
    type Error = DbError;

    fn try_from(row: FishProductRow) -> DbResult<Self> {
        Ok(FishProduct {
            price_per_kg: Money::new(decimal("price_per_kg", &row.price_per_kg)?),
            stock_kg: Weight::from_kg(decimal("stock_kg", &row.stock_kg)?),
            id: row.id,
            fisherman_id: row.fisherman_id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// orders
// =============================================================================

/// Column list shared by every order SELECT / RETURNING.
pub const ORDER_COLUMNS: &str = "id, fish_product_id, buyer_name, buyer_phone, buyer_address, \
     quantity_kg, total_price, payment_method, status, notes, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub fish_product_id: i64,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_address: String,
    pub quantity_kg: String,
    pub total_price: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Self> {
        Ok(Order {
            quantity_kg: Weight::from_kg(decimal("quantity_kg", &row.quantity_kg)?),
            total_price: Money::new(decimal("total_price", &row.total_price)?),
            id: row.id,
            fish_product_id: row.fish_product_id,
            buyer_name: row.buyer_name,
            buyer_phone: row.buyer_phone,
            buyer_address: row.buyer_address,
            payment_method: row.payment_method,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Converts a batch of rows, failing on the first corrupt one.
pub fn convert_all<R, T>(rows: Vec<R>) -> DbResult<Vec<T>>
where
    T: TryFrom<R, Error = DbError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_is_fixed_width_and_sortable() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let late = early + chrono::Duration::microseconds(1);

        assert_eq!(timestamp(early), "2024-01-01T09:00:00.000000Z");
        assert_eq!(timestamp(late), "2024-01-01T09:00:00.000001Z");
        assert!(timestamp(early) < timestamp(late));
    }

    #[test]
    fn test_corrupt_decimal_is_reported() {
        let row = FishProductRow {
            id: 1,
            fisherman_id: 1,
            name: "Tuna".to_string(),
            description: None,
            price_per_kg: "abc".to_string(),
            stock_kg: "1".to_string(),
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let err = FishProduct::try_from(row).unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { ref column, .. } if column == "price_per_kg"));
    }
}
