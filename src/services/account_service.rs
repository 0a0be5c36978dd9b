//! Account service layer - registration, login and profile lookup

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{CredentialManager, TokenService};
use crate::error::AppError;
use crate::models::{Account, NewAccount, RegisterRequest};
use crate::store::AccountStore;

/// Orchestrates the credential manager, token service and account store.
///
/// Each operation runs its steps strictly in sequence and reports the first
/// failure; nothing is retried.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    credentials: CredentialManager,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        credentials: CredentialManager,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            credentials,
            tokens,
        }
    }

    /// Hash the secret and store a new account
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AppError> {
        let secret_hash = self.credentials.hash(&request.password).await?;

        let account = self
            .store
            .create_account(NewAccount {
                identity: request.email,
                secret_hash,
                role: request.rol,
                preferred_language: request.lenguage,
            })
            .await?;

        info!(event = "user.registered", email = %account.identity, "New user registered");
        Ok(account)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, identity: &str, secret: &str) -> Result<String, AppError> {
        let account = self.store.find_by_identity(identity).await.map_err(|e| {
            warn!(event = "auth.failed", email = %identity, reason = %e, "Login for unknown user");
            AppError::from(e)
        })?;

        if !self.credentials.verify(secret, &account.secret_hash).await? {
            warn!(event = "auth.failed", email = %identity, "Incorrect password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.identity)?;
        info!(event = "auth.success", email = %account.identity, "User authenticated");
        Ok(token)
    }

    /// Account belonging to an already-verified identity
    pub async fn profile(&self, identity: &str) -> Result<Account, AppError> {
        Ok(self.store.find_by_identity(identity).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenError;
    use crate::store::InMemoryAccountStore;

    fn service() -> (AccountService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("test-secret"));
        let service = AccountService::new(
            Arc::new(InMemoryAccountStore::new()),
            CredentialManager::with_cost(4),
            tokens.clone(),
        );
        (service, tokens)
    }

    fn registration(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            rol: "dev".to_string(),
            lenguage: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let (service, _) = service();
        let account = service.register(registration("a@b.com", "pw123")).await.unwrap();

        assert_eq!(account.identity, "a@b.com");
        assert_eq!(account.role, "dev");
        assert_eq!(account.preferred_language, "en");
        assert_ne!(account.secret_hash, "pw123");
        assert!(account.secret_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn second_registration_is_a_duplicate() {
        let (service, _) = service();
        service.register(registration("a@b.com", "pw123")).await.unwrap();
        let second = service.register(registration("a@b.com", "other")).await;
        assert!(matches!(second, Err(AppError::DuplicateIdentity(_))));
    }

    #[tokio::test]
    async fn login_issues_token_for_identity() {
        let (service, tokens) = service();
        service.register(registration("a@b.com", "pw123")).await.unwrap();

        let token = service.login("a@b.com", "pw123").await.unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "a@b.com");
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() {
        let (service, _) = service();
        service.register(registration("a@b.com", "pw123")).await.unwrap();

        assert!(matches!(
            service.login("a@b.com", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@b.com", "pw123").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn profile_returns_stored_account() {
        let (service, _) = service();
        service.register(registration("a@b.com", "pw123")).await.unwrap();

        let account = service.profile("a@b.com").await.unwrap();
        assert_eq!(account.identity, "a@b.com");
        assert!(matches!(
            service.profile("gone@b.com").await,
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn token_errors_do_not_leak_into_login() {
        // Signing failures are server faults, never a 401.
        let error = AppError::from(TokenError::Signing(
            jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey.into(),
        ));
        assert!(matches!(error, AppError::Internal(_)));
    }
}
