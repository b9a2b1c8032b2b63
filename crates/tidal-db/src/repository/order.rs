//! # Order Repository
//!
//! Order placement, fisherman order queries and status updates.
//!
//! ## Order Placement Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place(NewOrder)                                      │
//! │                                                                         │
//! │  validate_new_order (no store access on bad input)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE (writers queue here)                                   │
//! │  SELECT product ─────────────────────────► none? NotFound               │
//! │  quote_order(product, quantity_kg) ──────► InactiveProduct              │
//! │       │                                    InsufficientStock            │
//! │       ▼                                                                 │
//! │  INSERT order (status = pending, total_price snapshot)                 │
//! │  UPDATE fish_products SET stock_kg = remaining                         │
//! │         WHERE id = ? AND stock_kg = <value read above>                 │
//! │       │                                                                 │
//! │       ├── 0 rows ──► ROLLBACK, TransactionFailed (stock moved)         │
//! │       ▼                                                                 │
//! │  COMMIT ──► Order                                                       │
//! │                                                                         │
//! │  Either both writes land or neither does.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::models::{self, convert_all, FishProductRow, OrderRow, ORDER_COLUMNS, PRODUCT_COLUMNS};
use tidal_core::pricing::quote_order;
use tidal_core::validation::validate_new_order;
use tidal_core::{FishProduct, NewOrder, Order, OrderStatus};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order and decrements the product's stock in one
    /// transaction.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Status `pending`, `total_price` = quantity × price now
    /// * `Err(DbError::NotFound)` - No such product
    /// * `Err(DbError::Rejected(InactiveProduct | InsufficientStock))`
    /// * `Err(DbError::TransactionFailed)` - Stock changed underneath us;
    ///   nothing was written
    ///
    /// ## Example
    /// ```rust,ignore
    /// // product: 25.50 per kg, 100.00 kg in stock
    /// let order = db.orders().place(&NewOrder { quantity_kg: "5.0".parse()?, .. }).await?;
    /// assert_eq!(order.total_price.to_string(), "127.50");
    /// // product stock is now 95.00
    /// ```
    pub async fn place(&self, input: &NewOrder) -> DbResult<Order> {
        validate_new_order(input)?;

        let product_id = input.fish_product_id;
        debug!(product_id, quantity_kg = %input.quantity_kg, "Placing order");

        // Take the write lock up front so concurrent placements queue on
        // busy_timeout instead of failing at their first write.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let row: Option<FishProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM fish_products WHERE id = ?1"
        ))
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;
        let row = row.ok_or_else(|| DbError::not_found("FishProduct", product_id))?;

        let stock_as_read = row.stock_kg.clone();
        let product = FishProduct::try_from(row)?;
        let quote = quote_order(&product, input.quantity_kg)?;

        let now = models::now();

        let order: OrderRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO orders (
                fish_product_id, buyer_name, buyer_phone, buyer_address,
                quantity_kg, total_price, payment_method, status, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(input.buyer_name.trim())
        .bind(input.buyer_phone.trim())
        .bind(input.buyer_address.trim())
        .bind(input.quantity_kg.to_string())
        .bind(quote.total_price.to_string())
        .bind(input.payment_method)
        .bind(OrderStatus::Pending)
        .bind(&input.notes)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE fish_products
            SET stock_kg = ?1, updated_at = ?2
            WHERE id = ?3 AND stock_kg = ?4
            "#,
        )
        .bind(quote.remaining_stock.to_string())
        .bind(&now)
        .bind(product_id)
        .bind(&stock_as_read)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            warn!(product_id, "Stock changed during order placement, rolling back");
            tx.rollback().await?;
            return Err(DbError::TransactionFailed(format!(
                "stock of product {product_id} changed concurrently"
            )));
        }

        tx.commit().await?;

        info!(
            order_id = order.id,
            product_id,
            total_price = %quote.total_price,
            remaining_stock = %quote.remaining_stock,
            "Order placed"
        );
        order.try_into()
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Order::try_from).transpose()
    }

    /// Lists orders placed against any product of `fisherman_id`, newest
    /// first, optionally narrowed to one status.
    pub async fn list_for_fisherman(
        &self,
        fisherman_id: i64,
        status: Option<OrderStatus>,
    ) -> DbResult<Vec<Order>> {
        debug!(fisherman_id, ?status, "Listing fisherman orders");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE fish_product_id IN (SELECT id FROM fish_products WHERE fisherman_id = "
        ));
        builder.push_bind(fisherman_id);
        builder.push(")");
        if let Some(status) = status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<OrderRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        convert_all(rows)
    }

    /// Lists every order of one product, oldest first.
    pub async fn list_for_product(&self, fish_product_id: i64) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE fish_product_id = ?1 ORDER BY id ASC"
        ))
        .bind(fish_product_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    /// Overwrites an order's status.
    ///
    /// Any status may be set from any other, terminal ones included.
    /// `total_price` and every other field stay as placed.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The order after the update
    /// * `Err(DbError::NotFound)` - No such order
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> DbResult<Order> {
        debug!(id, %status, "Updating order status");

        let row: Option<OrderRow> = sqlx::query_as(&format!(
            r#"
            UPDATE orders
            SET status = ?1, updated_at = ?2
            WHERE id = ?3
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(models::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("Order", id))?;

        info!(id, %status, "Order status updated");
        row.try_into()
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::test_support::{db, fisherman, listing};
    use std::time::Duration;
    use tidal_core::{CoreError, FishProductPatch, Money, PaymentMethod, Weight};

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn kg(s: &str) -> Weight {
        Weight::parse(s).unwrap()
    }

    fn order_for(product_id: i64, quantity: &str) -> NewOrder {
        NewOrder {
            fish_product_id: product_id,
            buyer_name: "Lee".to_string(),
            buyer_phone: "555-0199".to_string(),
            buyer_address: "1 Harbor Rd".to_string(),
            quantity_kg: kg(quantity),
            payment_method: PaymentMethod::CashOnPickup,
            notes: Some("Morning pickup".to_string()),
        }
    }

    async fn tuna(db: &Database, price: &str, stock: &str) -> FishProduct {
        let owner = fisherman(db, "ana@b.com").await;
        db.products()
            .create(&listing(owner.id, "Yellowfin Tuna", price, stock))
            .await
            .unwrap()
    }

    async fn stock_of(db: &Database, product_id: i64) -> Weight {
        db.products()
            .get_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .stock_kg
    }

    #[tokio::test]
    async fn test_place_prices_and_decrements() {
        let db = db().await;
        let product = tuna(&db, "25.50", "100.00").await;

        let order = db.orders().place(&order_for(product.id, "5.0")).await.unwrap();

        assert_eq!(order.total_price, money("127.50"));
        assert_eq!(order.total_price.to_string(), "127.50");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::CashOnPickup);
        assert_eq!(order.notes.as_deref(), Some("Morning pickup"));
        assert_eq!(stock_of(&db, product.id).await, kg("95.00"));
    }

    #[tokio::test]
    async fn test_place_refreshes_product_updated_at() {
        let db = db().await;
        let product = tuna(&db, "10", "10").await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        db.orders().place(&order_for(product.id, "1")).await.unwrap();

        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert!(after.updated_at > product.updated_at);
    }

    #[tokio::test]
    async fn test_place_exact_stock_leaves_zero() {
        let db = db().await;
        let product = tuna(&db, "12.00", "7.25").await;

        db.orders().place(&order_for(product.id, "7.25")).await.unwrap();
        assert!(stock_of(&db, product.id).await.is_zero());

        // Still listed, but nothing left to sell.
        let listed = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert!(listed.is_active);
        let err = db
            .orders()
            .place(&order_for(product.id, "0.01"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(CoreError::InsufficientStock { .. })));
    }

    #[tokio::test]
    async fn test_insufficient_stock_persists_nothing() {
        let db = db().await;
        let product = tuna(&db, "25.50", "100.00").await;

        let err = db
            .orders()
            .place(&order_for(product.id, "150.0"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Rejected(CoreError::InsufficientStock { product_id, .. }) if product_id == product.id
        ));
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(stock_of(&db, product.id).await, kg("100.00"));
    }

    #[tokio::test]
    async fn test_inactive_product_rejected_regardless_of_stock() {
        let db = db().await;
        let product = tuna(&db, "25.50", "100.00").await;
        db.products().soft_delete(product.id).await.unwrap();

        let err = db
            .orders()
            .place(&order_for(product.id, "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(CoreError::InactiveProduct(id)) if id == product.id));
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(stock_of(&db, product.id).await, kg("100"));
    }

    #[tokio::test]
    async fn test_unknown_product_not_found() {
        let db = db().await;
        let err = db.orders().place(&order_for(404, "1")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "FishProduct"));
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected_before_lookup() {
        let db = db().await;
        let err = db.orders().place(&order_for(404, "0")).await.unwrap_err();
        assert!(matches!(err, DbError::Rejected(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_total_price_is_a_snapshot() {
        let db = db().await;
        let product = tuna(&db, "25.50", "100.00").await;
        let order = db.orders().place(&order_for(product.id, "2")).await.unwrap();

        let patch = FishProductPatch {
            price_per_kg: Some(money("99.99")),
            ..Default::default()
        };
        db.products().update(product.id, &patch).await.unwrap();

        let stored = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price, money("51.00"));
    }

    #[tokio::test]
    async fn test_repeated_orders_do_not_drift() {
        let db = db().await;
        let product = tuna(&db, "3.10", "1.00").await;

        for _ in 0..10 {
            db.orders().place(&order_for(product.id, "0.10")).await.unwrap();
        }

        assert!(stock_of(&db, product.id).await.is_zero());
        let orders = db.orders().list_for_product(product.id).await.unwrap();
        assert_eq!(orders.len(), 10);
        assert!(orders.iter().all(|o| o.total_price == money("0.31")));
    }

    #[tokio::test]
    async fn test_list_for_fisherman_joins_through_products() {
        let db = db().await;
        let ana = fisherman(&db, "ana@b.com").await;
        let ben = fisherman(&db, "ben@b.com").await;
        let ana_tuna = db
            .products()
            .create(&listing(ana.id, "Tuna", "10", "100"))
            .await
            .unwrap();
        let ana_squid = db
            .products()
            .create(&listing(ana.id, "Squid", "8", "100"))
            .await
            .unwrap();
        let ben_cod = db
            .products()
            .create(&listing(ben.id, "Cod", "9", "100"))
            .await
            .unwrap();

        let first = db.orders().place(&order_for(ana_tuna.id, "1")).await.unwrap();
        let second = db.orders().place(&order_for(ana_squid.id, "2")).await.unwrap();
        db.orders().place(&order_for(ben_cod.id, "3")).await.unwrap();

        let orders = db.orders().list_for_fisherman(ana.id, None).await.unwrap();
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        db.orders()
            .update_status(first.id, OrderStatus::Confirmed)
            .await
            .unwrap();
        let confirmed = db
            .orders()
            .list_for_fisherman(ana.id, Some(OrderStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, first.id);

        let none = db.orders().list_for_fisherman(9999, None).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_is_unrestricted() {
        let db = db().await;
        let product = tuna(&db, "10", "10").await;
        let order = db.orders().place(&order_for(product.id, "1")).await.unwrap();

        let completed = db
            .orders()
            .update_status(order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);

        // Terminal back to pending is allowed.
        tokio::time::sleep(Duration::from_millis(5)).await;
        let reopened = db
            .orders()
            .update_status(order.id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reopened.status, OrderStatus::Pending);
        assert!(reopened.updated_at > completed.updated_at);
        assert_eq!(reopened.total_price, order.total_price);
    }

    #[tokio::test]
    async fn test_update_status_unknown_is_not_found() {
        let db = db().await;
        let err = db
            .orders()
            .update_status(12, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Order"));
    }

    async fn file_db(tag: &str) -> (Database, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "tidal-{}-{}-{}.db",
            tag,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let db = Database::new(DbConfig::new(&path).max_connections(4))
            .await
            .unwrap();
        (db, path)
    }

    async fn remove_file_db(db: Database, path: std::path::PathBuf) {
        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    async fn place_concurrently(
        db: &Database,
        product_id: i64,
        quantity: &str,
        count: usize,
    ) -> Vec<DbResult<Order>> {
        let mut handles = Vec::new();
        for _ in 0..count {
            let db = db.clone();
            let order = order_for(product_id, quantity);
            handles.push(tokio::spawn(async move { db.orders().place(&order).await }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_placements_within_stock_all_succeed() {
        let (db, path) = file_db("fill").await;
        let product = tuna(&db, "10.00", "100.00").await;

        let results = place_concurrently(&db, product.id, "1", 10).await;

        for result in &results {
            assert!(result.is_ok(), "placement failed: {:?}", result);
        }
        assert_eq!(db.orders().count().await.unwrap(), 10);
        assert_eq!(stock_of(&db, product.id).await, kg("90.00"));

        remove_file_db(db, path).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_placements_never_oversell() {
        let (db, path) = file_db("race").await;
        let product = tuna(&db, "10.00", "100.00").await;

        let results = place_concurrently(&db, product.id, "15", 10).await;

        let mut placed = 0i64;
        for result in results {
            match result {
                Ok(_) => placed += 1,
                Err(DbError::TransactionFailed(_))
                | Err(DbError::Rejected(CoreError::InsufficientStock { .. })) => {}
                Err(other) => panic!("unexpected placement error: {:?}", other),
            }
        }

        // Writers are serialized, so every placement sees the latest stock
        assert_eq!(placed, 6);
        assert_eq!(db.orders().count().await.unwrap(), placed);
        assert_eq!(stock_of(&db, product.id).await, kg("10.00"));

        remove_file_db(db, path).await;
    }
}
