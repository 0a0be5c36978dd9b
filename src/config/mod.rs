//! Process configuration loaded once at startup.
//!
//! Every setting has a development default so the server boots on a bare
//! machine. Production deployments are expected to override at least
//! `SECRET_KEY` and the `DB_*` values.

use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DEFAULT_SECRET_KEY: &str = "tu_secreta_llave";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Connection settings for the account database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub host: String,
    pub name: String,
    pub password: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub secret_key: String,
    pub cors_allowed_origin: HeaderValue,
    pub request_timeout: Duration,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            user: var("DB_USER", "tu_usuario"),
            host: var("DB_HOST", "localhost"),
            name: var("DB_NAME", "softjobs"),
            password: var("DB_PASSWORD", "tu_contraseña"),
            port: parse(&lookup, "DB_PORT", 5432, "port number")?,
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10, "connection count")?,
            acquire_timeout: Duration::from_secs(parse(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
                "number of seconds",
            )?),
        };

        let origin = var("CORS_ALLOWED_ORIGIN", "http://localhost:3000");
        let cors_allowed_origin =
            HeaderValue::from_str(origin.trim()).map_err(|_| ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGIN",
                expected: "header value",
                value: origin.clone(),
            })?;

        Ok(Self {
            port: parse(&lookup, "PORT", 3001, "port number")?,
            secret_key: var("SECRET_KEY", DEFAULT_SECRET_KEY),
            cors_allowed_origin,
            request_timeout: Duration::from_secs(parse(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                30,
                "number of seconds",
            )?),
            database,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("secret_key", &"[REDACTED]")
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("request_timeout", &self.request_timeout)
            .field("database", &self.database)
            .finish()
    }
}

fn parse<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}
