use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::{rngs::OsRng, Rng};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::error;

use crate::accounts::repo_types::Account;

/// Account numbers are drawn uniformly from `0..ACCOUNT_NUMBER_RANGE`.
pub const ACCOUNT_NUMBER_RANGE: i64 = 100_000;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub fn hash_password(plain: &str) -> Result<String, AccountError> {
    if plain.is_empty() {
        return Err(AccountError::Hashing("password must not be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AccountError::Hashing(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AccountError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AccountError::Hashing(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Builds a new, not yet persisted account.
///
/// The password is hashed, a random account number is assigned and the
/// creation time is stamped in UTC. The id stays `0` until the store
/// assigns one.
pub fn new_account(
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<Account, AccountError> {
    let encrypted_password = hash_password(password)?;
    let number = rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_RANGE);

    // Postgres keeps microseconds; truncate so the returned value matches what is stored.
    let now = OffsetDateTime::now_utc();
    let created_at = now.replace_microsecond(now.microsecond()).unwrap_or(now);

    Ok(Account {
        id: 0,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        number,
        encrypted_password,
        balance: 0,
        created_at,
    })
}
