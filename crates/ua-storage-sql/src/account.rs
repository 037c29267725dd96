//! `PostgreSQL` implementation of the account store.

use async_trait::async_trait;
use sqlx::PgPool;
use ua_model::{Account, HashedAccount};
use ua_storage::{AccountStore, OperationContext, StorageError, StorageResult};
use uuid::Uuid;

use crate::entities::AccountRow;
use crate::error::{from_insert_error, from_sqlx_error};

/// `PostgreSQL` account store.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Creates a new `PostgreSQL` account store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(
        &self,
        ctx: &OperationContext,
        account: HashedAccount,
    ) -> StorageResult<Account> {
        let mut tx = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(StorageError::Cancelled),
            tx = self.pool.begin() => tx.map_err(from_sqlx_error)?,
        };

        // Dropping `tx` on cancellation rolls the insert back.
        let row: AccountRow = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(StorageError::Cancelled),
            row = sqlx::query_as::<_, AccountRow>(
                r"INSERT INTO accounts (id, identifier, secret_hash)
                VALUES ($1, $2, $3)
                RETURNING id, identifier, secret_hash, created_at",
            )
            .bind(Uuid::now_v7())
            .bind(&account.identifier)
            .bind(account.secret_hash.as_str())
            .fetch_one(&mut *tx) => row.map_err(|e| from_insert_error(e, &account.identifier))?,
        };

        // The commit is not raced against cancellation: once it is issued the
        // write is reported as done.
        tx.commit().await.map_err(from_sqlx_error)?;

        tracing::debug!(id = %row.id, "account row committed");
        Ok(row.into())
    }

    async fn find_by_identifier(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> StorageResult<Option<Account>> {
        let row: Option<AccountRow> = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(StorageError::Cancelled),
            row = sqlx::query_as::<_, AccountRow>(
                r"SELECT id, identifier, secret_hash, created_at
                FROM accounts
                WHERE identifier = $1",
            )
            .bind(identifier)
            .fetch_optional(&self.pool) => row.map_err(from_sqlx_error)?,
        };

        Ok(row.map(Account::from))
    }
}
