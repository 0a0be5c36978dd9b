//! Account handlers: registration, login and the caller's own profile

use std::sync::Arc;

use axum::{extract::State, Json};

use super::ValidatedJson;
use crate::auth::AuthenticatedIdentity;
use crate::error::AppError;
use crate::models::{AccountView, LoginRequest, RegisterRequest, TokenResponse};
use crate::services::AccountService;

/// Register a new account
pub async fn register(
    State(service): State<Arc<AccountService>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<AccountView>, AppError> {
    let account = service.register(request).await?;
    Ok(Json(account.into()))
}

/// Authenticate and issue a token
pub async fn login(
    State(service): State<Arc<AccountService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = service.login(&request.email, &request.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// Account of the token holder
pub async fn profile(
    State(service): State<Arc<AccountService>>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> Result<Json<AccountView>, AppError> {
    let account = service.profile(&identity).await?;
    Ok(Json(account.into()))
}
