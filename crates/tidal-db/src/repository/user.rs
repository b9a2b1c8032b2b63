//! # User Repository
//!
//! Account operations: fisherman registration and login.
//!
//! ## Registration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register(RegisterFisherman)                                            │
//! │                                                                         │
//! │  validate_registration ──► hash_password (argon2)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  INSERT users (role = fisherman)  ── UNIQUE(email) ──► DuplicateEmail   │
//! │  INSERT fishermen_profiles                                              │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  A user never exists without its profile, and vice versa.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::credentials::{hash_password_blocking, verify_password_blocking};
use crate::error::{DbError, DbResult};
use crate::models::{self, ProfileRow, UserRow};
use tidal_core::validation::{validate_login, validate_registration};
use tidal_core::{CoreError, FishermanProfile, LoginRequest, RegisterFisherman, User, UserRole};

const USER_COLUMNS: &str =
    "id, full_name, email, phone_number, password_hash, role, created_at, updated_at";

/// Repository for user and fisherman profile operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a fisherman: the user row and its profile, atomically.
    ///
    /// ## Returns
    /// * `Ok(User)` - The new account (role `fisherman`)
    /// * `Err(DbError::Rejected(CoreError::DuplicateEmail))` - Email taken
    /// * `Err(DbError::Rejected(CoreError::Validation))` - Bad input
    pub async fn register(&self, input: &RegisterFisherman) -> DbResult<User> {
        validate_registration(input)?;

        let email = input.email.trim();
        debug!(email = %email, "Registering fisherman");

        let password_hash = hash_password_blocking(&input.password).await?;
        let now = models::now();

        let mut tx = self.pool.begin().await?;

        let user: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (
                full_name, email, phone_number, password_hash, role, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(input.full_name.trim())
        .bind(email)
        .bind(input.phone_number.trim())
        .bind(&password_hash)
        .bind(UserRole::Fisherman)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            err if err.is_unique_violation_on("users.email") => {
                DbError::Rejected(CoreError::DuplicateEmail(email.to_string()))
            }
            err => err,
        })?;

        sqlx::query(
            r#"
            INSERT INTO fishermen_profiles (user_id, catch_location, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(user.id)
        .bind(input.catch_location.trim())
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user_id = user.id, "Fisherman registered");
        Ok(user.into())
    }

    /// Looks up a user by exact email and checks the password.
    ///
    /// Unknown email and wrong password both return `Ok(None)`; callers
    /// cannot tell them apart.
    pub async fn login(&self, input: &LoginRequest) -> DbResult<Option<User>> {
        validate_login(input)?;

        let email = input.email.trim();
        debug!(email = %email, "Login attempt");

        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        // Unknown emails still pay for one argon2 verification
        let verified = verify_password_blocking(
            &input.password,
            row.as_ref().map(|row| row.password_hash.as_str()),
        )
        .await?;
        let user = row.filter(|_| verified).map(User::from);

        debug!(matched = user.is_some(), "Login finished");
        Ok(user)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(User::from))
    }

    /// Gets the fisherman profile of a user, if there is one.
    pub async fn profile_for(&self, user_id: i64) -> DbResult<Option<FishermanProfile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, catch_location, created_at, updated_at
            FROM fishermen_profiles
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FishermanProfile::from))
    }

    /// Counts all users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
