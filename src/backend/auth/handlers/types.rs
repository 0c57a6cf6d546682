/**
 * Authentication Handler Types
 *
 * Request and response bodies used by the signup, login and me handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::AccessToken;
use crate::backend::auth::users::UserRecord;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
    /// Optional display name
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Login form (`application/x-www-form-urlencoded`)
///
/// Field names follow the OAuth2 password grant; `grant_type` and `scope`
/// are accepted and ignored.
#[derive(Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token response returned by login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl From<&AccessToken> for TokenResponse {
    fn from(token: &AccessToken) -> Self {
        Self {
            access_token: token.token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: token.lifetime_secs(),
        }
    }
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.subject_id,
            email: user.email,
            full_name: user.full_name,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
