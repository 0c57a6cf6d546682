/**
 * Store Configuration
 *
 * This module decides which store implementations back the application.
 *
 * # Error Handling
 *
 * A configured database that cannot be opened is logged but does not prevent
 * server startup: the server falls back to in-memory stores and keeps running.
 */

use std::sync::Arc;

use crate::backend::auth::user_db::SqliteUserStore;
use crate::backend::auth::users::{InMemoryUserStore, UserStore};
use crate::backend::db;
use crate::backend::movies::{InMemoryMovieStore, MovieStore, SqliteMovieStore};

/// The pair of stores the application runs on
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub movies: Arc<dyn MovieStore>,
}

impl Stores {
    /// Process-local stores; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            movies: Arc::new(InMemoryMovieStore::new()),
        }
    }
}

/// Open the stores for `database_url`
///
/// # Returns
///
/// - SQLite stores if `database_url` is set and the database opens and migrates
/// - In-memory stores if it is unset or anything fails
pub async fn load_stores(database_url: Option<&str>) -> Stores {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Using in-memory stores.");
        return Stores::in_memory();
    };

    tracing::info!("Connecting to database...");

    match db::connect(database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection pool created successfully");
            Stores {
                users: Arc::new(SqliteUserStore::new(pool.clone())),
                movies: Arc::new(SqliteMovieStore::new(pool)),
            }
        }
        Err(e) => {
            tracing::error!("Failed to open database: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            Stores::in_memory()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unset_url_uses_memory() {
        let stores = load_stores(None).await;
        assert!(stores.users.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bad_url_falls_back() {
        let stores = load_stores(Some("sqlite:///tokengate-missing-dir/nested/app.db")).await;
        assert!(stores.movies.list_for_owner("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_memory_url() {
        let stores = load_stores(Some("sqlite::memory:")).await;
        assert!(stores.users.find_by_subject_id("bob").await.unwrap().is_none());
    }
}
