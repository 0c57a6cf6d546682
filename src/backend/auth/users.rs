/**
 * User Model and Store Contract
 *
 * This module defines the authenticable principal and the store interface the
 * auth core reads it through. The core never assumes a persistence
 * mechanism: the in-memory store here and the SQLite store in `user_db`
 * satisfy the same trait.
 *
 * Not-found is `Ok(None)`, never an error.
 */

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::backend::db::StoreError;

/// User record as stored
#[derive(Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Stable unique identifier carried in token `sub` claims (the username)
    pub subject_id: String,
    /// User email address
    pub email: String,
    /// Display name
    pub full_name: Option<String>,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Disabled accounts cannot obtain tokens or reach active-only routes
    pub active: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Login name; identical to the subject id
    pub fn username(&self) -> &str {
        &self.subject_id
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("subject_id", &self.subject_id)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password_hash", &"<redacted>")
            .field("active", &self.active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data needed to register a user
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub active: bool,
}

impl NewUser {
    fn into_record(self, created_at: DateTime<Utc>) -> UserRecord {
        UserRecord {
            subject_id: self.username,
            email: self.email,
            full_name: self.full_name,
            password_hash: self.password_hash,
            active: self.active,
            created_at,
        }
    }
}

/// Lookup and registration of users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get user by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Get user by the subject carried in a token
    async fn find_by_subject_id(&self, subject_id: &str)
        -> Result<Option<UserRecord>, StoreError>;

    /// Create a new user
    ///
    /// Fails with `StoreError::Conflict` if the username is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Delete a user, returning whether one existed
    async fn delete(&self, subject_id: &str) -> Result<bool, StoreError>;
}

/// Process-local user store
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`
    pub fn with_users(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.subject_id.clone(), record))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_subject_id(
        &self,
        subject_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(subject_id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::conflict("user", &user.username));
        }
        let record = user.into_record(Utc::now());
        users.insert(record.subject_id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, subject_id: &str) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(subject_id).is_some())
    }
}
