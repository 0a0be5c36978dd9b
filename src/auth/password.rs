//! Password hashing with bcrypt.
//!
//! Hashing is CPU-bound on purpose, so both operations are moved onto the
//! blocking thread pool instead of stalling the async workers.

use thiserror::Error;
use tokio::task::{self, JoinError};

/// Work factor used for every stored hash.
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Worker(#[from] JoinError),
}

#[derive(Debug, Clone, Copy)]
pub struct CredentialManager {
    cost: u32,
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self { cost: HASH_COST }
    }
}

impl CredentialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager with a custom work factor. Tests use the bcrypt minimum.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Derive a salted hash. Two calls with the same input never return the
    /// same string.
    pub async fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(hashed)
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`. Only a hash that bcrypt cannot parse is an
    /// error. The comparison itself is constant-time.
    pub async fn verify(&self, plaintext: &str, secret_hash: &str) -> Result<bool, CredentialError> {
        let plaintext = plaintext.to_owned();
        let secret_hash = secret_hash.to_owned();
        let matches =
            task::spawn_blocking(move || bcrypt::verify(plaintext, &secret_hash)).await??;
        Ok(matches)
    }
}
