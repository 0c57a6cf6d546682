/**
 * SQLite Movie Store
 *
 * Every statement carries `owner = ?` so scoping is enforced by the query,
 * not by filtering afterwards.
 */

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::backend::db::StoreError;
use crate::backend::movies::model::{Movie, MovieDraft, MovieStore};

/// `MovieStore` backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteMovieStore {
    pool: SqlitePool,
}

impl SqliteMovieStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<Movie>, StoreError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, owner, name, year, rating FROM movies WHERE owner = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    async fn get(&self, owner: &str, id: i64) -> Result<Option<Movie>, StoreError> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, owner, name, year, rating FROM movies WHERE id = ? AND owner = ?",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    async fn create(&self, owner: &str, draft: MovieDraft) -> Result<Movie, StoreError> {
        let result = sqlx::query("INSERT INTO movies (owner, name, year, rating) VALUES (?, ?, ?, ?)")
            .bind(owner)
            .bind(&draft.name)
            .bind(draft.year)
            .bind(draft.rating)
            .execute(&self.pool)
            .await?;

        Ok(Movie {
            id: result.last_insert_rowid(),
            owner: owner.to_string(),
            name: draft.name,
            year: draft.year,
            rating: draft.rating,
        })
    }

    async fn update(
        &self,
        owner: &str,
        id: i64,
        draft: MovieDraft,
    ) -> Result<Option<Movie>, StoreError> {
        let result = sqlx::query(
            "UPDATE movies SET name = ?, year = ?, rating = ? WHERE id = ? AND owner = ?",
        )
        .bind(&draft.name)
        .bind(draft.year)
        .bind(draft.rating)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Movie {
            id,
            owner: owner.to_string(),
            name: draft.name,
            year: draft.year,
            rating: draft.rating,
        }))
    }

    async fn delete(&self, owner: &str, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ? AND owner = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_owner(&self, owner: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE owner = ?")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
