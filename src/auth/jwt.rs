//! JWT token handling
//!
//! Tokens are HS256-signed and carry only the account identity plus issue
//! and expiry timestamps. Nothing is stored server-side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account identity
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token could not be parsed: {0}")]
    Malformed(String),

    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::seconds(TOKEN_TTL_SECS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for `identity` that expires one TTL from now.
    pub fn issue(&self, identity: &str) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if it had been minted at `issued_at`.
    pub fn issue_at(&self, identity: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            email: identity.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Check signature and expiry, returning the identity the token is bound to.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.email)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_identity() {
        let service = TokenService::new("test-secret");
        let token = service.issue("a@b.com").unwrap();
        assert!(!token.is_empty());
        assert_eq!(service.verify(&token).unwrap(), "a@b.com");
    }

    #[test]
    fn expiry_is_one_hour_after_issue() {
        let service = TokenService::new("test-secret");
        let issued_at = Utc::now();
        let token = service.issue_at("a@b.com", issued_at).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
        assert_eq!(claims.iat, issued_at.timestamp());
    }

    #[test]
    fn token_past_expiry_is_rejected() {
        let service = TokenService::new("test-secret");
        let token = service
            .issue_at("a@b.com", Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let issuer = TokenService::new("someone-else");
        let verifier = TokenService::new("test-secret");
        let token = issuer.issue("a@b.com").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let service = TokenService::new("test-secret");
        assert!(matches!(
            service.verify("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(service.verify(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn debug_hides_key() {
        let debug = format!("{:?}", TokenService::new("test-secret"));
        assert!(!debug.contains("test-secret"));
    }
}
