//! SQLite connection pool and migration runner for the bookstore service.

use std::str::FromStr;

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod error;
pub mod migrate;

pub use error::{DbError, DbResult};
pub use migrate::{run_migrations, Migration};

const MEMORY_URL: &str = "sqlite::memory:";

/// Connection settings for the catalog database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_url")]
    pub url: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseSettings {
    fn default_url() -> String {
        "sqlite://bookstore.db?mode=rwc".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    /// Whether the URL points at a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
        }
    }
}

/// Shared handle to the catalog database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured URL with foreign keys enforced.
    pub async fn connect(settings: &DatabaseSettings) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(|e| DbError::Config(format!("invalid database url '{}': {e}", settings.url)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` sees its own empty database.
        let mut pool_options = SqlitePoolOptions::new();
        pool_options = if settings.is_in_memory() {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(settings.max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;

        tracing::info!(
            target: "bookstore-db",
            url = %settings.url,
            "database pool ready"
        );

        Ok(Self { pool })
    }

    /// Open a fresh, private in-memory database.
    pub async fn in_memory() -> DbResult<Self> {
        Self::connect(&DatabaseSettings {
            url: MEMORY_URL.to_string(),
            max_connections: 1,
        })
        .await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to verify the pool is usable.
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "bookstore-db", "database pool closed");
    }
}
