//! # Password Credentials
//!
//! Argon2id hashing for fisherman passwords. The stored value is a PHC
//! string (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) carrying its own
//! salt and parameters, so verification needs nothing but the stored text.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::error::{DbError, DbResult};

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored hash.
///
/// A malformed stored hash simply fails verification.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// A real argon2 hash no account owns. Login verifies against it when the
/// email is unknown, so a miss costs the same as a wrong password.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| hash_password("tidal-decoy-password").unwrap_or_default())
}

/// [`hash_password`] on the blocking pool, off the async workers.
pub async fn hash_password_blocking(password: &str) -> DbResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DbError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking pool. With no stored hash the
/// password is checked against the decoy and the result is always `false`.
pub async fn verify_password_blocking(password: &str, stored_hash: Option<&str>) -> DbResult<bool> {
    let password = password.to_owned();
    let stored_hash = stored_hash.map(str::to_owned);
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password(&password, decoy_hash());
            false
        }
    })
    .await
    .map_err(|e| DbError::Internal(format!("Password check task failed: {}", e)))
}
