//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted
//! to domain models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use ua_model::{Account, SecretHash};
use uuid::Uuid;

/// Database row for accounts.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    /// Primary key.
    pub id: Uuid,
    /// Email address, unique.
    pub identifier: String,
    /// PHC-formatted secret hash.
    pub secret_hash: String,
    /// Insertion time, set by the database.
    pub created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            identifier: row.identifier,
            secret_hash: SecretHash::from_phc(row.secret_hash),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_account() {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let row = AccountRow {
            id,
            identifier: "a@example.com".to_string(),
            secret_hash: "$argon2id$hash".to_string(),
            created_at: now,
        };

        let account = Account::from(row);

        assert_eq!(account.id, id);
        assert_eq!(account.identifier, "a@example.com");
        assert_eq!(account.secret_hash.as_str(), "$argon2id$hash");
        assert_eq!(account.created_at, now);
    }
}
