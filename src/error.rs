//! HTTP-facing error type.
//!
//! Component errors convert into [`AppError`]; its `IntoResponse` impl picks
//! the status code and keeps server-side detail out of 5xx bodies. Only the
//! token and credential checks have their own status codes; a rejected
//! payload is a plain 500 like any other failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::{CredentialError, TokenError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("authorization token not provided")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(TokenError),

    #[error("incorrect password")]
    InvalidCredentials,

    #[error("account not found")]
    NotFound,

    #[error("identity already registered: {0}")]
    DuplicateIdentity(String),

    #[error("account store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::FORBIDDEN,
            Self::InvalidToken(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_)
            | Self::DuplicateIdentity(_)
            | Self::StoreUnavailable(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::MissingToken => "Token not provided".to_string(),
            Self::InvalidToken(_) => "Invalid token".to_string(),
            Self::InvalidCredentials => "Incorrect password".to_string(),
            Self::NotFound => "User not found".to_string(),
            Self::Validation(_)
            | Self::DuplicateIdentity(_)
            | Self::StoreUnavailable(_)
            | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            StoreError::DuplicateIdentity(identity) => Self::DuplicateIdentity(identity),
            StoreError::Unavailable(source) => Self::StoreUnavailable(source.to_string()),
            StoreError::Query(source) => Self::Internal(format!("store query failed: {}", source)),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(_) => Self::Internal(e.to_string()),
            other => Self::InvalidToken(other),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn statuses_follow_the_wire_contract() {
        assert_eq!(AppError::MissingToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InvalidToken(TokenError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DuplicateIdentity("a@b.com".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn rejected_payloads_answer_generic_500() {
        let (status, body) = body_json(AppError::Validation("password is required".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn server_errors_hide_detail() {
        let (status, body) =
            body_json(AppError::StoreUnavailable("connection refused on 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn token_failures_collapse_to_one_message() {
        for cause in [
            TokenError::Expired,
            TokenError::InvalidSignature,
            TokenError::Malformed("bad base64".into()),
        ] {
            let (status, body) = body_json(AppError::from(cause)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"], "Invalid token");
        }
    }

    #[test]
    fn store_errors_map_to_app_errors() {
        assert!(matches!(
            AppError::from(StoreError::NotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(StoreError::DuplicateIdentity("x".into())),
            AppError::DuplicateIdentity(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Unavailable(sqlx::Error::PoolTimedOut)),
            AppError::StoreUnavailable(_)
        ));
    }
}
