//! Secret hashing and verification using Argon2id.
//!
//! - Argon2id for memory-hard hashing
//! - Secure random salt per hash
//! - Constant-time comparison on verify

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use ua_model::{PlainSecret, SecretHash};

use crate::error::{AuthError, AuthResult};

/// Hashing work factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashPolicy {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
    /// Output hash length in bytes.
    pub hash_length: u32,
}

impl Default for HashPolicy {
    fn default() -> Self {
        // OWASP recommended settings for Argon2id
        Self {
            memory_cost: 19 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
        }
    }
}

impl HashPolicy {
    /// Creates a new policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub const fn memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Sets the time cost (iterations).
    #[must_use]
    pub const fn time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    /// Sets the parallelism factor.
    #[must_use]
    pub const fn parallelism(mut self, p: u32) -> Self {
        self.parallelism = p;
        self
    }

    /// Builds the Argon2 parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if the parameters are out of range.
    pub fn params(&self) -> AuthResult<Params> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

/// Secret hasher using Argon2id.
#[derive(Debug, Clone)]
pub struct SecretHasher {
    policy: HashPolicy,
}

impl SecretHasher {
    /// Creates a new hasher with the given policy.
    #[must_use]
    pub const fn new(policy: HashPolicy) -> Self {
        Self { policy }
    }

    /// Creates a new hasher with the default policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(HashPolicy::default())
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &HashPolicy {
        &self.policy
    }

    /// Hashes a secret with a fresh random salt.
    ///
    /// Returns the PHC-formatted hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is invalid or hashing fails.
    pub fn hash(&self, secret: &PlainSecret) -> AuthResult<SecretHash> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.policy.params()?);

        let hash = argon2
            .hash_password(secret.expose().as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(SecretHash::from_phc(hash.to_string()))
    }

    /// Verifies a secret against a hash.
    ///
    /// The parameters embedded in the hash are used, so hashes created under
    /// an older policy still verify.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the secret does not match,
    /// or `AuthError::InvalidHash` if the hash cannot be parsed.
    pub fn verify(&self, secret: &PlainSecret, hash: &SecretHash) -> AuthResult<()> {
        let parsed =
            PasswordHash::new(hash.as_str()).map_err(|e| AuthError::InvalidHash(e.to_string()))?;

        Argon2::default()
            .verify_password(secret.expose().as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Checks if a hash was created with parameters other than the current policy.
    #[must_use]
    pub fn needs_rehash(&self, hash: &SecretHash) -> bool {
        let Ok(parsed) = PasswordHash::new(hash.as_str()) else {
            return true;
        };

        if parsed.algorithm != argon2::ARGON2ID_IDENT {
            return true;
        }

        let params = &parsed.params;
        let m_cost = params.get_decimal("m").unwrap_or(0);
        let t_cost = params.get_decimal("t").unwrap_or(0);
        let p_cost = params.get_decimal("p").unwrap_or(0);

        m_cost != self.policy.memory_cost
            || t_cost != self.policy.time_cost
            || p_cost != self.policy.parallelism
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
