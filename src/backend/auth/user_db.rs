/**
 * SQLite User Store
 *
 * Relational implementation of `UserStore`. The `users` table is keyed by
 * username, which doubles as the token subject.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::users::{NewUser, UserRecord, UserStore};
use crate::backend::db::{map_unique_violation, StoreError};

const SELECT_USER: &str = r#"
    SELECT username AS subject_id, email, full_name, password_hash, active, created_at
    FROM users
    WHERE username = ?
"#;

/// `UserStore` backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(SELECT_USER)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        self.fetch(username).await
    }

    async fn find_by_subject_id(
        &self,
        subject_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        self.fetch(subject_id).await
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (username, email, full_name, password_hash, active, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.active)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "user", &user.username))?;

        self.fetch(&user.username)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn delete(&self, subject_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(subject_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::db::connect_in_memory;
    use assert_matches::assert_matches;

    async fn store() -> SqliteUserStore {
        SqliteUserStore::new(connect_in_memory().await.unwrap())
    }

    fn new_user(username: &str, active: bool) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            full_name: Some("Test User".to_string()),
            password_hash: "$2b$04$placeholder".to_string(),
            active,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = store().await;
        let created = store.insert(new_user("bob", true)).await.unwrap();
        assert_eq!(created.subject_id, "bob");
        assert_eq!(created.email, "bob@example.com");
        assert_eq!(created.full_name.as_deref(), Some("Test User"));
        assert!(created.active);

        let found = store.find_by_username("bob").await.unwrap().unwrap();
        assert_eq!(found.subject_id, "bob");
        assert_eq!(found.password_hash, "$2b$04$placeholder");
        assert!(store.find_by_subject_id("bob").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_inactive_flag_round_trips() {
        let store = store().await;
        store.insert(new_user("alice", false)).await.unwrap();
        let found = store.find_by_subject_id("alice").await.unwrap().unwrap();
        assert!(!found.active);
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let store = store().await;
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let store = store().await;
        store.insert(new_user("bob", true)).await.unwrap();
        assert_matches!(
            store.insert(new_user("bob", true)).await,
            Err(StoreError::Conflict { entity: "user", .. })
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store().await;
        store.insert(new_user("bob", true)).await.unwrap();
        assert!(store.delete("bob").await.unwrap());
        assert!(!store.delete("bob").await.unwrap());
        assert!(store.find_by_subject_id("bob").await.unwrap().is_none());
    }
}
