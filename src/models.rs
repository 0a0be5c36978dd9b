//! Data models for the account service

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored account row.
///
/// The column names come from the `usuarios` table the service was built
/// against, so they are mapped onto clearer field names here.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    #[sqlx(rename = "email")]
    pub identity: String,
    #[sqlx(rename = "password")]
    pub secret_hash: String,
    #[sqlx(rename = "rol")]
    pub role: String,
    #[sqlx(rename = "lenguage")]
    pub preferred_language: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("identity", &self.identity)
            .field("secret_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("preferred_language", &self.preferred_language)
            .finish()
    }
}

/// Values for a row about to be inserted. The secret is already hashed.
#[derive(Clone)]
pub struct NewAccount {
    pub identity: String,
    pub secret_hash: String,
    pub role: String,
    pub preferred_language: String,
}

/// Account as returned to clients. Never carries the secret hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    #[serde(rename = "email")]
    pub identity: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "lenguage")]
    pub preferred_language: String,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            identity: account.identity,
            role: account.role,
            preferred_language: account.preferred_language,
        }
    }
}

/// Registration request payload
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub rol: String,
    #[serde(default)]
    pub lenguage: String,
}

/// Login request payload
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// A missing email is looked up like any other and simply not found.
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
