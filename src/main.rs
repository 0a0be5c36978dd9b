//! Softjobs account server
//!
//! Loads configuration, wires the PostgreSQL account store and serves the
//! account API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use softjobs_server::{
    app_state::AppState,
    auth::{CredentialManager, TokenService},
    build_app,
    config::AppConfig,
    store::PgAccountStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set; tokens are signed with the built-in development key");
    }

    let store = PgAccountStore::connect_lazy(&config.database);
    let state = AppState::with_store(
        Arc::new(store),
        CredentialManager::new(),
        TokenService::new(&config.secret_key),
    );

    let app = build_app(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(address = %addr, "Server starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
