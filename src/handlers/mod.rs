//! API handlers for the account service

pub mod accounts;
mod validated_json;

pub use accounts::{login, profile, register};
pub use validated_json::ValidatedJson;
