/**
 * Database Connection and Store Errors
 *
 * SQLite connection pool setup, embedded migrations, and the error type
 * shared by every store implementation (in-memory and relational).
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Store-level failures
///
/// "Not found" is never an error; stores return `Ok(None)` or `Ok(false)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same unique key already exists
    #[error("{entity} already exists: {key}")]
    Conflict {
        entity: &'static str,
        key: String,
    },

    /// The backing database failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn conflict(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            key: key.into(),
        }
    }
}

/// Map a unique-constraint violation to `StoreError::Conflict`
pub(crate) fn map_unique_violation(
    err: sqlx::Error,
    entity: &'static str,
    key: &str,
) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::conflict(entity, key)
        }
        _ => StoreError::Database(err),
    }
}

/// Connect to a SQLite database and run migrations
///
/// # Arguments
/// * `database_url` - e.g. `sqlite://tokengate.db` or `sqlite::memory:`
///
/// # Returns
/// A migrated connection pool
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = pool_options(database_url).connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Pool settings for `database_url`
///
/// An in-memory database lives and dies with its connection, so that pool
/// holds exactly one connection and never reaps it.
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// Connect to a fresh in-memory database (used by tests)
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    connect("sqlite::memory:").await
}
