//! Route definitions for the account API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::auth::require_token;
use crate::handlers::{login, profile, register};

// Account routes
pub fn account_routes(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/usuarios", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/usuarios", get(profile))
        .route_layer(middleware::from_fn_with_state(state, require_token));

    public_routes.merge(protected_routes)
}

// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}
