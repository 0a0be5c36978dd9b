//! Token gate for protected routes.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::app_state::AppState;
use crate::error::AppError;

/// Identity proven by a verified token, placed in request extensions by
/// [`require_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity(pub String);

/// Rejects the request unless it carries a valid token.
///
/// The header may hold the raw token, as existing clients send it, or the
/// usual `Bearer <token>` form.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::trim));

    let token = match header {
        None | Some(Ok("")) => return Err(AppError::MissingToken),
        Some(Ok(value)) => value.strip_prefix("Bearer ").unwrap_or(value).trim().to_owned(),
        Some(Err(_)) => {
            warn!(event = "auth.invalid_header", "Authorization header is not valid text");
            return Err(AppError::InvalidToken(crate::auth::TokenError::Malformed(
                "non-ASCII authorization header".to_string(),
            )));
        }
    };

    let identity = state.tokens.verify(&token).map_err(|e| {
        warn!(event = "auth.token_rejected", reason = %e, "Token verification failed");
        AppError::from(e)
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedIdentity(identity));

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or(AppError::MissingToken)
    }
}
