//! Account administrator: the create-account orchestration.

use ua_auth::{AuthError, SecretHasher};
use ua_model::{
    Account, HashedAccount, NewAccount, PlainSecret, SecretHash, ValidationError, Validator,
};
use ua_storage::{AccountStore, OperationContext};

use crate::config::{AdminConfig, IdentifierPolicy};
use crate::error::{AdminError, AdminResult, ErrorKind};

/// Coordinates validation, hashing and storage of new accounts.
///
/// Stateless apart from its configuration; share it behind an `Arc` to
/// serve concurrent callers.
#[derive(Debug, Clone)]
pub struct AccountAdministrator<S> {
    store: S,
    hasher: SecretHasher,
    validator: Validator,
    identifier_policy: IdentifierPolicy,
}

impl<S: AccountStore> AccountAdministrator<S> {
    /// Creates an administrator over `store`.
    #[must_use]
    pub fn new(store: S, config: AdminConfig) -> Self {
        Self {
            store,
            hasher: SecretHasher::new(config.hashing),
            validator: Validator::new(config.validation),
            identifier_policy: config.identifier,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies identifier normalization and validates a candidate.
    ///
    /// Returns the candidate as it would be persisted. Performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the candidate triggers.
    pub fn validate(&self, candidate: NewAccount) -> Result<NewAccount, ValidationError> {
        let candidate = self.normalize(candidate);
        self.validator.validate_new(&candidate)?;
        Ok(candidate)
    }

    /// Creates a new account.
    ///
    /// The secret is hashed (on the blocking pool) before the store is
    /// contacted, and only the hash is handed to the store. On success
    /// exactly one record was written; on any failure none was.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Validation`] if the candidate breaks a rule; the store is not called.
    /// - [`AdminError::AlreadyExists`] if the identifier is taken.
    /// - [`AdminError::Connection`] / [`AdminError::Storage`] on store failures.
    /// - [`AdminError::Cancelled`] if `ctx` was cancelled before the write committed.
    pub async fn create_account(
        &self,
        ctx: &OperationContext,
        candidate: NewAccount,
    ) -> AdminResult<Account> {
        let candidate = match self.validate(candidate) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::debug!(stage = "validate", error = %e, "account candidate rejected");
                return Err(e.into());
            }
        };

        if ctx.is_cancelled() {
            return Err(AdminError::Cancelled);
        }

        let NewAccount { identifier, secret } = candidate;
        tracing::debug!(%identifier, "creating account");

        let secret_hash = self.hash_secret(secret).await?;
        let hashed = HashedAccount {
            identifier,
            secret_hash,
        };

        let identifier = hashed.identifier.clone();
        match self.store.insert(ctx, hashed).await {
            Ok(stored) => {
                tracing::info!(id = %stored.id, %identifier, "account created");
                Ok(stored)
            }
            Err(e) => {
                let err = AdminError::from(e);
                match err.kind() {
                    ErrorKind::Conflict | ErrorKind::Cancelled => {
                        tracing::info!(
                            stage = "insert",
                            %identifier,
                            error = %err,
                            "account not created"
                        );
                    }
                    _ => {
                        tracing::warn!(
                            stage = "insert",
                            %identifier,
                            error = %err,
                            "account store failed"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    /// Looks an account up by identifier, applying the identifier policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_account(
        &self,
        ctx: &OperationContext,
        identifier: &str,
    ) -> AdminResult<Option<Account>> {
        let identifier = self.identifier_policy.apply(identifier);
        self.store
            .find_by_identifier(ctx, &identifier)
            .await
            .map_err(AdminError::from)
    }

    /// Checks a secret against a stored account's hash.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Hashing`] if the stored hash is unreadable.
    pub fn verify_secret(&self, account: &Account, secret: &PlainSecret) -> AdminResult<bool> {
        match self.hasher.verify(secret, &account.secret_hash) {
            Ok(()) => Ok(true),
            Err(AuthError::InvalidCredentials) => Ok(false),
            Err(e) => Err(AdminError::Hashing(e.to_string())),
        }
    }

    fn normalize(&self, candidate: NewAccount) -> NewAccount {
        let identifier = self.identifier_policy.apply(&candidate.identifier).into_owned();
        NewAccount {
            identifier,
            secret: candidate.secret,
        }
    }

    /// Hashes on the blocking pool; the plaintext is dropped inside the task.
    async fn hash_secret(&self, secret: PlainSecret) -> AdminResult<SecretHash> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| AdminError::Hashing(e.to_string()))?
            .map_err(|e| {
                tracing::error!(stage = "hash", error = %e, "secret hashing failed");
                AdminError::Hashing(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use ua_auth::HashPolicy;
    use ua_model::ValidationPolicy;
    use ua_storage::InMemoryAccountStore;

    use super::*;

    fn admin() -> AccountAdministrator<InMemoryAccountStore> {
        AccountAdministrator::new(
            InMemoryAccountStore::new(),
            AdminConfig::new().with_hashing(HashPolicy::new().memory_cost(1024).time_cost(1)),
        )
    }

    #[test]
    fn validate_returns_normalized_candidate() {
        let admin = AccountAdministrator::new(
            InMemoryAccountStore::new(),
            AdminConfig::new().with_identifier(IdentifierPolicy::lowercase()),
        );

        let candidate = admin
            .validate(NewAccount::new("Mixed@Example.COM", "Sup3rSecret!"))
            .unwrap();
        assert_eq!(candidate.identifier, "mixed@example.com");
    }

    #[test]
    fn validate_applies_policy() {
        let admin = AccountAdministrator::new(
            InMemoryAccountStore::new(),
            AdminConfig::new().with_validation(ValidationPolicy::new().min_secret_length(20)),
        );

        let err = admin
            .validate(NewAccount::new("a@example.com", "Sup3rSecret!"))
            .unwrap_err();
        assert_eq!(err, ValidationError::SecretTooShort { min: 20 });
    }

    #[tokio::test]
    async fn stored_hash_verifies() {
        let admin = admin();
        let ctx = OperationContext::background();

        let stored = admin
            .create_account(&ctx, NewAccount::new("a@example.com", "Sup3rSecret!"))
            .await
            .unwrap();

        assert!(admin.verify_secret(&stored, &PlainSecret::new("Sup3rSecret!")).unwrap());
        assert!(!admin.verify_secret(&stored, &PlainSecret::new("wrong-secret")).unwrap());
    }

    #[tokio::test]
    async fn pre_cancelled_context_skips_hashing_and_store() {
        let admin = admin();
        let (ctx, handle) = OperationContext::cancellable();
        handle.cancel();

        let err = admin
            .create_account(&ctx, NewAccount::new("a@example.com", "Sup3rSecret!"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::Cancelled));
        assert!(admin.store().is_empty());
    }
}
