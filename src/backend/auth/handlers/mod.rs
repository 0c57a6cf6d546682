//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - Token issuance handler
//! └── me.rs       - Current user (read, delete)
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - User registration
//! - **`login`** - POST /api/auth/login - Password login, returns a bearer token
//! - **`get_me`** - GET /api/auth/me - Current user info (active accounts)
//! - **`delete_me`** - DELETE /api/auth/me - Delete own account

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Current user handlers
pub mod me;

// Re-export commonly used types
pub use types::{LoginForm, SignupRequest, TokenResponse, UserResponse};

// Re-export handlers
pub use login::login;
pub use me::{delete_me, get_me};
pub use signup::signup;
