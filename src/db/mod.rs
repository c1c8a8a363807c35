//! Database access layer.
//!
//! # Responsibilities
//! - Bind a connection pool to the application's configuration
//! - Expose the pool to handlers through shared state
//! - Report connectivity for health checks
//! - Close connections when the application shuts down
//!
//! # Design Decisions
//! - Connect on first use: binding never blocks startup on the database
//! - The pool is cheap to clone; every clone shares the same connections

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("invalid database url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Handle to the application's database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Bind a lazily connecting pool for the configured database.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn init_app(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)
            .map_err(|source| DatabaseError::InvalidUrl {
                url: config.url.clone(),
                source,
            })?;

        tracing::debug!(
            max_connections = config.max_connections,
            "Database pool bound"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
