use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::accounts::repo_types::Account;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account {0} not found")]
    AccountNotFound(i32),
    #[error("Account with number {0} not found")]
    NumberNotFound(i64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage capability for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates the schema if it does not exist yet. Safe to call repeatedly.
    async fn init(&self) -> Result<(), StoreError>;
    /// Inserts the account and returns it with the database id filled in.
    async fn create_account(&self, account: Account) -> Result<Account, StoreError>;
    /// Deletes by id. Deleting an id that does not exist is not an error.
    async fn delete_account(&self, id: i32) -> Result<(), StoreError>;
    /// Reserved; accounts are immutable after creation.
    async fn update_account(&self) -> Result<(), StoreError>;
    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError>;
    async fn get_account_by_id(&self, id: i32) -> Result<Account, StoreError>;
    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS account (
                id                 SERIAL PRIMARY KEY,
                first_name         VARCHAR(50) NOT NULL,
                last_name          VARCHAR(50) NOT NULL,
                number             BIGINT NOT NULL,
                encrypted_password TEXT NOT NULL,
                balance            BIGINT NOT NULL DEFAULT 0,
                created_at         TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        debug!("account schema ready");
        Ok(())
    }

    async fn create_account(&self, mut account: Account) -> Result<Account, StoreError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO account (first_name, last_name, number, encrypted_password, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.number)
        .bind(&account.encrypted_password)
        .bind(account.balance)
        .bind(account.created_at)
        .fetch_one(&self.db)
        .await?;
        account.id = id;
        Ok(account)
    }

    async fn delete_account(&self, id: i32) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        debug!(id, rows = res.rows_affected(), "delete account");
        Ok(())
    }

    async fn update_account(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, encrypted_password, balance, created_at
            FROM account
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Account, StoreError> {
        let mut rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, encrypted_password, balance, created_at
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;
        // last scanned row wins
        rows.pop().ok_or(StoreError::AccountNotFound(id))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError> {
        let mut rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, encrypted_password, balance, created_at
            FROM account
            WHERE number = $1
            "#,
        )
        .bind(number)
        .fetch_all(&self.db)
        .await?;
        // numbers are not unique; the last scanned row wins
        rows.pop().ok_or(StoreError::NumberNotFound(number))
    }
}
