//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{CredentialManager, TokenService};
use crate::services::AccountService;
use crate::store::AccountStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>, tokens: Arc<TokenService>) -> Self {
        Self {
            account_service,
            tokens,
        }
    }

    /// Wire the services around an account store.
    pub fn with_store(
        store: Arc<dyn AccountStore>,
        credentials: CredentialManager,
        tokens: TokenService,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let account_service = Arc::new(AccountService::new(store, credentials, tokens.clone()));
        Self::new(account_service, tokens)
    }
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_service.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
