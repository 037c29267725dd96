//! In-memory account store.
//!
//! Reference implementation of [`AccountStore`]. Accounts live in a map keyed
//! by identifier; the uniqueness check and the insert happen under a single
//! write lock.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use ua_model::{Account, HashedAccount};

use crate::account::{AccountStore, ACCOUNT_ENTITY, IDENTIFIER_FIELD};
use crate::context::OperationContext;
use crate::error::{StorageError, StorageResult};

/// Thread-safe in-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Returns `true` if no account is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Snapshot of all stored accounts, in no particular order.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.read().values().cloned().collect()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(
        &self,
        ctx: &OperationContext,
        account: HashedAccount,
    ) -> StorageResult<Account> {
        if ctx.is_cancelled() {
            return Err(StorageError::Cancelled);
        }

        let mut accounts = self.accounts.write();
        match accounts.entry(account.identifier.clone()) {
            Entry::Occupied(_) => Err(StorageError::duplicate(
                ACCOUNT_ENTITY,
                IDENTIFIER_FIELD,
                account.identifier,
            )),
            Entry::Vacant(slot) => {
                let stored = Account::from_hashed(account);
                tracing::debug!(id = %stored.id, "account stored in memory");
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_identifier(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> StorageResult<Option<Account>> {
        if ctx.is_cancelled() {
            return Err(StorageError::Cancelled);
        }

        Ok(self.accounts.read().get(identifier).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ua_model::SecretHash;

    use super::*;

    fn hashed(identifier: &str) -> HashedAccount {
        HashedAccount {
            identifier: identifier.to_string(),
            secret_hash: SecretHash::from_phc("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$ZGlnZXN0"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identity() {
        let store = InMemoryAccountStore::new();
        let ctx = OperationContext::background();

        let stored = store.insert(&ctx, hashed("a@example.com")).await.unwrap();

        assert_eq!(stored.identifier, "a@example.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate() {
        let store = InMemoryAccountStore::new();
        let ctx = OperationContext::background();

        let first = store.insert(&ctx, hashed("a@example.com")).await.unwrap();
        let err = store.insert(&ctx, hashed("a@example.com")).await.unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(store.len(), 1);
        let found = store
            .find_by_identifier(&ctx, "a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn identifiers_are_case_sensitive() {
        let store = InMemoryAccountStore::new();
        let ctx = OperationContext::background();

        store.insert(&ctx, hashed("a@example.com")).await.unwrap();
        store.insert(&ctx, hashed("A@example.com")).await.unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = InMemoryAccountStore::new();
        let ctx = OperationContext::background();

        let found = store.find_by_identifier(&ctx, "nobody@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn cancelled_context_writes_nothing() {
        let store = InMemoryAccountStore::new();
        let (ctx, handle) = OperationContext::cancellable();
        handle.cancel();

        let err = store.insert(&ctx, hashed("a@example.com")).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(store.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_have_one_winner() {
        let store = Arc::new(InMemoryAccountStore::new());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .insert(&OperationContext::background(), hashed("race@example.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) if e.is_duplicate() => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.len(), 1);
    }
}
