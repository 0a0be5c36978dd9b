//! In-process account store, the test double for [`super::PgAccountStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, StoreError};
use crate::models::{Account, NewAccount};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.identity) {
            return Err(StoreError::DuplicateIdentity(account.identity));
        }

        let stored = Account {
            identity: account.identity,
            secret_hash: account.secret_hash,
            role: account.role,
            preferred_language: account.preferred_language,
        };
        accounts.insert(stored.identity.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .await
            .get(identity)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
