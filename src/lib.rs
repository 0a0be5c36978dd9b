//! Softjobs account service
//!
//! Registers users, checks their passwords, issues bearer tokens and serves
//! the token holder's own account record.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

use crate::app_state::AppState;
use crate::config::AppConfig;

/// Build the application router with request logging and the panic fallback.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::account_routes(state.clone()))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
}

/// The served application: [`build_router`] plus the configured request
/// timeout and CORS policy.
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    build_router(state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::cors_layer(config.cors_allowed_origin.clone()))
}
