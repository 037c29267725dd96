//! Account storage provider trait.

use std::sync::Arc;

use async_trait::async_trait;
use ua_model::{Account, HashedAccount};

use crate::context::OperationContext;
use crate::error::StorageResult;

/// Entity name used in storage errors.
pub const ACCOUNT_ENTITY: &str = "Account";

/// Field name used in duplicate errors.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Provider for account storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account, assigning its id and creation time.
    ///
    /// The uniqueness check and the write are a single atomic step.
    ///
    /// ## Errors
    ///
    /// - `StorageError::Duplicate` if an account with the same identifier exists.
    /// - `StorageError::Cancelled` if `ctx` was cancelled before the write committed.
    /// - `StorageError::Connection` on transport failures.
    async fn insert(
        &self,
        ctx: &OperationContext,
        account: HashedAccount,
    ) -> StorageResult<Account>;

    /// Looks an account up by its identifier.
    async fn find_by_identifier(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> StorageResult<Option<Account>>;
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    async fn insert(
        &self,
        ctx: &OperationContext,
        account: HashedAccount,
    ) -> StorageResult<Account> {
        (**self).insert(ctx, account).await
    }

    async fn find_by_identifier(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> StorageResult<Option<Account>> {
        (**self).find_by_identifier(ctx, identifier).await
    }
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for Box<T> {
    async fn insert(
        &self,
        ctx: &OperationContext,
        account: HashedAccount,
    ) -> StorageResult<Account> {
        (**self).insert(ctx, account).await
    }

    async fn find_by_identifier(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> StorageResult<Option<Account>> {
        (**self).find_by_identifier(ctx, identifier).await
    }
}
