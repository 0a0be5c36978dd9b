//! PostgreSQL-backed account store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use super::{AccountStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Account, NewAccount};

const ACCOUNT_COLUMNS: &str =
    "email, password, COALESCE(rol, '') AS rol, COALESCE(lenguage, '') AS lenguage";

#[derive(Clone)]
pub struct PgAccountStore {
    db_pool: PgPool,
}

impl PgAccountStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Build the pool without opening a connection. Connectivity problems
    /// surface per request as [`StoreError::Unavailable`].
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            max_connections = config.max_connections,
            "Initializing database connection pool"
        );

        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        Self::new(db_pool)
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let query = format!(
            "INSERT INTO usuarios (email, password, rol, lenguage) VALUES ($1, $2, $3, $4) RETURNING {}",
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(&account.identity)
            .bind(&account.secret_hash)
            .bind(&account.role)
            .bind(&account.preferred_language)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| classify(e, &account.identity))
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Account, StoreError> {
        let query = format!("SELECT {} FROM usuarios WHERE email = $1", ACCOUNT_COLUMNS);

        sqlx::query_as::<_, Account>(&query)
            .bind(identity)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| classify(e, identity))?
            .ok_or(StoreError::NotFound)
    }
}

fn classify(error: sqlx::Error, identity: &str) -> StoreError {
    match error {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            StoreError::DuplicateIdentity(identity.to_string())
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(error),
        other => StoreError::Query(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_failures_are_unavailable() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut, "a@b.com"),
            StoreError::Unavailable(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            classify(sqlx::Error::Io(io), "a@b.com"),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn other_failures_are_query_errors() {
        assert!(matches!(
            classify(sqlx::Error::ColumnNotFound("rol".into()), "a@b.com"),
            StoreError::Query(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::RowNotFound, "a@b.com"),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn lazy_pool_reports_unreachable_database() {
        let config = DatabaseConfig {
            user: "nobody".into(),
            host: "127.0.0.1".into(),
            name: "softjobs".into(),
            password: "nothing".into(),
            port: 1,
            max_connections: 1,
            acquire_timeout: std::time::Duration::from_millis(500),
        };
        let store = PgAccountStore::connect_lazy(&config);

        let result = store.find_by_identity("a@b.com").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
