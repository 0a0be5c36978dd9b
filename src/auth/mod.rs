//! Authentication module for the account service
//!
//! - Password hashing and verification (bcrypt)
//! - JWT token issuance and validation
//! - Token gate middleware for protected routes

mod jwt;
pub mod middleware;
mod password;

pub use jwt::{Claims, TokenError, TokenService, TOKEN_TTL_SECS};
pub use middleware::{require_token, AuthenticatedIdentity};
pub use password::{CredentialError, CredentialManager, HASH_COST};
