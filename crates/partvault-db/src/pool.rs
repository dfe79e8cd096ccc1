//! Database connection pool management.

use crate::error::DbError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default timeout when acquiring a connection from the pool.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the PostgreSQL connection pool.
///
/// Cloning is cheap; all clones share the same underlying pool.
///
/// # Example
///
/// ```rust,ignore
/// use partvault_db::DbPool;
///
/// let pool = DbPool::connect("postgres://localhost/partvault").await?;
/// let row_count = sqlx::query("SELECT 1").execute(pool.inner()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Connect to the database with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the connection cannot be
    /// established.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        Self::connect_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect to the database with an explicit connection limit.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the connection cannot be
    /// established.
    pub async fn connect_with_options(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::debug!(max_connections, "Database pool connected");

        Ok(Self { pool })
    }

    /// Wrap an existing `PgPool`.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying `sqlx` pool for executing queries.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for in-flight connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
