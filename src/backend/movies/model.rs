/**
 * Movie Model and Store Contract
 *
 * Movies are owned by a user (`owner` is the owner's subject id) and every
 * store operation is scoped to an owner: a movie belonging to someone else
 * behaves exactly like a missing one.
 */

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::backend::db::StoreError;
use crate::shared::SharedError;

/// Minimum length of a movie name, in characters
pub const MIN_NAME_LEN: usize = 4;

/// Stored movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub year: i64,
    pub rating: f64,
}

/// Client-supplied movie fields (create and full update)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub name: String,
    pub year: i64,
    pub rating: f64,
}

impl MovieDraft {
    /// Check field constraints before the draft reaches a store
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().chars().count() < MIN_NAME_LEN {
            return Err(SharedError::validation(
                "name",
                format!("must be at least {} characters", MIN_NAME_LEN),
            ));
        }
        if !self.rating.is_finite() {
            return Err(SharedError::validation("rating", "must be a finite number"));
        }
        Ok(())
    }
}

/// Owner-scoped movie persistence
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies of `owner`, ordered by id
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<Movie>, StoreError>;

    /// Movie `id` if it belongs to `owner`
    async fn get(&self, owner: &str, id: i64) -> Result<Option<Movie>, StoreError>;

    async fn create(&self, owner: &str, draft: MovieDraft) -> Result<Movie, StoreError>;

    /// Replace all fields of movie `id`; `None` if `owner` has no such movie
    async fn update(
        &self,
        owner: &str,
        id: i64,
        draft: MovieDraft,
    ) -> Result<Option<Movie>, StoreError>;

    /// Delete movie `id`, returning whether `owner` had it
    async fn delete(&self, owner: &str, id: i64) -> Result<bool, StoreError>;

    /// Delete every movie of `owner`, returning how many were removed
    async fn delete_for_owner(&self, owner: &str) -> Result<u64, StoreError>;
}

#[derive(Default)]
struct MovieTable {
    next_id: i64,
    rows: BTreeMap<i64, Movie>,
}

/// Process-local movie store
#[derive(Default)]
pub struct InMemoryMovieStore {
    table: RwLock<MovieTable>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<Movie>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|movie| movie.owner == owner)
            .cloned()
            .collect())
    }

    async fn get(&self, owner: &str, id: i64) -> Result<Option<Movie>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|m| m.owner == owner).cloned())
    }

    async fn create(&self, owner: &str, draft: MovieDraft) -> Result<Movie, StoreError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let movie = Movie {
            id: table.next_id,
            owner: owner.to_string(),
            name: draft.name,
            year: draft.year,
            rating: draft.rating,
        };
        table.rows.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(
        &self,
        owner: &str,
        id: i64,
        draft: MovieDraft,
    ) -> Result<Option<Movie>, StoreError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(movie) if movie.owner == owner => {
                movie.name = draft.name;
                movie.year = draft.year;
                movie.rating = draft.rating;
                Ok(Some(movie.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner: &str, id: i64) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        let owned = table.rows.get(&id).is_some_and(|m| m.owner == owner);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn delete_for_owner(&self, owner: &str) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, movie| movie.owner != owner);
        Ok((before - table.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(name: &str) -> MovieDraft {
        MovieDraft {
            name: name.to_string(),
            year: 2001,
            rating: 8.8,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft("Heat").validate().is_ok());
        assert!(draft("Up").validate().is_err());
        assert!(draft("  Up  ").validate().is_err());

        let mut bad_rating = draft("Alien");
        bad_rating.rating = f64::NAN;
        assert!(bad_rating.validate().is_err());
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let store = InMemoryMovieStore::new();
        let mine = store.create("bob", draft("The Fellowship")).await.unwrap();
        let theirs = store.create("alice", draft("The Two Towers")).await.unwrap();

        assert_eq!(store.list_for_owner("bob").await.unwrap(), vec![mine.clone()]);
        assert_eq!(store.get("bob", mine.id).await.unwrap(), Some(mine.clone()));
        assert_eq!(store.get("bob", theirs.id).await.unwrap(), None);
        assert_eq!(store.update("bob", theirs.id, draft("Stolen")).await.unwrap(), None);
        assert!(!store.delete("bob", theirs.id).await.unwrap());
        assert_eq!(store.get("alice", theirs.id).await.unwrap(), Some(theirs));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryMovieStore::new();
        let movie = store.create("bob", draft("Solaris")).await.unwrap();

        let updated = store
            .update("bob", movie.id, MovieDraft { name: "Stalker".into(), year: 1979, rating: 8.1 })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, movie.id);
        assert_eq!(updated.name, "Stalker");
        assert_eq!(updated.year, 1979);

        assert!(store.delete("bob", movie.id).await.unwrap());
        assert!(store.get("bob", movie.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = InMemoryMovieStore::new();
        let first = store.create("bob", draft("Brazil")).await.unwrap();
        store.delete("bob", first.id).await.unwrap();
        let second = store.create("bob", draft("Brazil")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_delete_for_owner() {
        let store = InMemoryMovieStore::new();
        store.create("bob", draft("Vertigo")).await.unwrap();
        store.create("bob", draft("Psycho")).await.unwrap();
        store.create("alice", draft("Rebecca")).await.unwrap();

        assert_eq!(store.delete_for_owner("bob").await.unwrap(), 2);
        assert!(store.list_for_owner("bob").await.unwrap().is_empty());
        assert_eq!(store.list_for_owner("alice").await.unwrap().len(), 1);
    }
}
