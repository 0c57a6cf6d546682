//! Authentication Module
//!
//! This module issues and validates access tokens. Everything else in the
//! server consumes it through the `Authenticator` and the auth middleware.
//!
//! # Architecture
//!
//! - **`clock`** - Injectable UTC time source
//! - **`password`** - bcrypt hashing policy
//! - **`sessions`** - HS256 token minting and signature/expiry verification
//! - **`users`** - User record and the `UserStore` contract (in-memory store)
//! - **`user_db`** - SQLite `UserStore`
//! - **`failure`** - The `AuthError` taxonomy
//! - **`authenticator`** - Credential issuer and validator
//! - **`extractor`** - Where a request carries its token (header, cookie)
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email and password → user created
//! 2. **Login**: username and password verified → token returned
//! 3. **Protected request**: token extracted → validated → user resolved
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless, signed with HS256 and expire after a fixed TTL
//!   (15 minutes by default); there is no refresh and no revocation
//! - Unknown users and wrong passwords return the same 401
//! - All rejected tokens return the same 401
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Duration;
//! use tokengate::backend::auth::{AuthSettings, Authenticator, InMemoryUserStore, SystemClock};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = Authenticator::new(
//!     Arc::new(InMemoryUserStore::new()),
//!     b"change-me",
//!     AuthSettings { token_ttl: Duration::minutes(15), bcrypt_cost: 12 },
//!     Arc::new(SystemClock),
//! );
//! let user = auth.authenticate("bob", "secret1").await?;
//! let token = auth.issue_default_token(&user.subject_id)?;
//! let same_user = auth.validate(&token.token).await?;
//! # Ok(())
//! # }
//! ```

pub mod clock;

pub mod password;

/// Token generation and validation
pub mod sessions;

/// User data model and store contract
pub mod users;

pub mod user_db;

pub mod failure;

pub mod authenticator;

pub mod extractor;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use authenticator::{AuthSettings, Authenticator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use extractor::{AccessTokenCookie, BearerHeader, CredentialExtractor, FirstMatch};
pub use failure::AuthError;
pub use handlers::{delete_me, get_me, login, signup};
pub use password::PasswordHasher;
pub use sessions::{AccessToken, Claims, TokenService};
pub use user_db::SqliteUserStore;
pub use users::{InMemoryUserStore, NewUser, UserRecord, UserStore};
