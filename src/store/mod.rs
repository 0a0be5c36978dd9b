//! Account persistence.
//!
//! The service only ever inserts an account or looks one up by identity.
//! [`AccountStore`] is the seam between the service and the database so
//! handlers can be exercised against [`InMemoryAccountStore`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Account, NewAccount};

mod memory;
mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an account for {0} already exists")]
    DuplicateIdentity(String),

    #[error("account not found")]
    NotFound,

    #[error("account store unreachable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("account query failed: {0}")]
    Query(#[source] sqlx::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, failing if the identity is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_by_identity(&self, identity: &str) -> Result<Account, StoreError>;
}
