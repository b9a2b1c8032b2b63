//! # Fish Product Repository
//!
//! Database operations for fish product listings.
//!
//! ## Key Operations
//! - Create (owner must be a fisherman)
//! - Partial update, soft delete
//! - Filtered listing
//!
//! ## Listing Filters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter { search, min_price, max_price, fisherman_id, is_active }│
//! │                                                                         │
//! │  In SQL (WHERE ... AND ...):                                           │
//! │    fisherman_id  fisherman_id = ?                                       │
//! │    is_active     is_active = ?                                          │
//! │                                                                         │
//! │  In Rust, on the decoded rows:                                         │
//! │    search                  Unicode case-insensitive substring          │
//! │    min_price / max_price   exact Decimal comparison                     │
//! │    (SQLite lower() folds ASCII only; prices are TEXT columns)           │
//! │                                                                         │
//! │  No filter at all returns every row, active or not.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::models::{self, convert_all, FishProductRow, UserRow, PRODUCT_COLUMNS};
use tidal_core::pricing::ensure_fisherman;
use tidal_core::validation::{validate_filter, validate_new_product, validate_product_patch};
use tidal_core::{FishProduct, FishProductPatch, NewFishProduct, ProductFilter, User};

/// Repository for fish product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.create(&new_listing).await?;
/// let cheap = repo.list(&ProductFilter::new().max_price(price)).await?;
/// let gone = repo.soft_delete(product.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a listing. New products start active.
    ///
    /// ## Returns
    /// * `Ok(FishProduct)` - The stored listing
    /// * `Err(DbError::Rejected(CoreError::InvalidOwner))` - `fisherman_id`
    ///   is unknown or names a buyer
    pub async fn create(&self, input: &NewFishProduct) -> DbResult<FishProduct> {
        validate_new_product(input)?;

        debug!(fisherman_id = input.fisherman_id, name = %input.name, "Creating product");

        let owner: Option<UserRow> = sqlx::query_as(
            "SELECT id, full_name, email, phone_number, password_hash, role, created_at, updated_at
             FROM users WHERE id = ?1",
        )
        .bind(input.fisherman_id)
        .fetch_optional(&self.pool)
        .await?;
        let owner = owner.map(User::from);
        ensure_fisherman(input.fisherman_id, owner.as_ref())?;

        let now = models::now();

        let row: FishProductRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO fish_products (
                fisherman_id, name, description, price_per_kg, stock_kg,
                image_url, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.fisherman_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.price_per_kg.to_string())
        .bind(input.stock_kg.to_string())
        .bind(&input.image_url)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, fisherman_id = row.fisherman_id, "Product created");
        row.try_into()
    }

    /// Gets a product by id, active or not.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<FishProduct>> {
        let row: Option<FishProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM fish_products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(FishProduct::try_from).transpose()
    }

    /// Lists products matching every supplied filter, by id ascending.
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<FishProduct>> {
        validate_filter(filter)?;

        debug!(?filter, "Listing products");

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM fish_products "));

        if filter.fisherman_id.is_some() || filter.is_active.is_some() {
            builder.push("WHERE ");
        }
        let mut where_clause = builder.separated(" AND ");
        if let Some(fisherman_id) = filter.fisherman_id {
            where_clause.push("fisherman_id = ");
            where_clause.push_bind_unseparated(fisherman_id);
        }
        if let Some(is_active) = filter.is_active {
            where_clause.push("is_active = ");
            where_clause.push_bind_unseparated(is_active);
        }
        builder.push(" ORDER BY id ASC");

        let rows: Vec<FishProductRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        let products: Vec<FishProduct> = convert_all(rows)?;

        let products: Vec<FishProduct> = products
            .into_iter()
            .filter(|p| filter.matches_name(&p.name) && filter.matches_price(p.price_per_kg))
            .collect();

        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    /// Lists one fisherman's products, newest first.
    pub async fn list_for_fisherman(&self, fisherman_id: i64) -> DbResult<Vec<FishProduct>> {
        debug!(fisherman_id, "Listing fisherman products");

        let rows: Vec<FishProductRow> = sqlx::query_as(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM fish_products
            WHERE fisherman_id = ?1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(fisherman_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    /// Applies a partial update. Only supplied fields change; `updated_at`
    /// is always refreshed, even for an empty patch.
    ///
    /// ## Returns
    /// * `Ok(FishProduct)` - The product after the update
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn update(&self, id: i64, patch: &FishProductPatch) -> DbResult<FishProduct> {
        validate_product_patch(patch)?;

        debug!(id, ?patch, "Updating product");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE fish_products SET ");
        let mut set_clause = builder.separated(", ");
        set_clause.push("updated_at = ");
        set_clause.push_bind_unseparated(models::now());
        if let Some(name) = &patch.name {
            set_clause.push("name = ");
            set_clause.push_bind_unseparated(name.trim().to_string());
        }
        if let Some(description) = &patch.description {
            set_clause.push("description = ");
            set_clause.push_bind_unseparated(description.clone());
        }
        if let Some(price) = patch.price_per_kg {
            set_clause.push("price_per_kg = ");
            set_clause.push_bind_unseparated(price.to_string());
        }
        if let Some(stock) = patch.stock_kg {
            set_clause.push("stock_kg = ");
            set_clause.push_bind_unseparated(stock.to_string());
        }
        if let Some(image_url) = &patch.image_url {
            set_clause.push("image_url = ");
            set_clause.push_bind_unseparated(image_url.clone());
        }
        if let Some(is_active) = patch.is_active {
            set_clause.push("is_active = ");
            set_clause.push_bind_unseparated(is_active);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {PRODUCT_COLUMNS}"));

        let row: Option<FishProductRow> =
            builder.build_query_as().fetch_optional(&self.pool).await?;
        let row = row.ok_or_else(|| DbError::not_found("FishProduct", id))?;

        info!(id, "Product updated");
        row.try_into()
    }

    /// Marks a product inactive. Idempotent: an already inactive product
    /// comes back unchanged apart from `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(FishProduct)` - The product, now inactive
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn soft_delete(&self, id: i64) -> DbResult<FishProduct> {
        debug!(id, "Soft-deleting product");

        let row: Option<FishProductRow> = sqlx::query_as(&format!(
            r#"
            UPDATE fish_products
            SET is_active = 0, updated_at = ?1
            WHERE id = ?2
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(models::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("FishProduct", id))?;

        info!(id, "Product deactivated");
        row.try_into()
    }

    /// Counts all products, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fish_products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
