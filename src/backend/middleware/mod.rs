//! Middleware Module
//!
//! HTTP middleware run before handlers.
//!
//! - **`auth`** - Token validation for protected routes, plus the `AuthUser`
//!   and `ActiveUser` extractors
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use tokengate::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/auth/me", get(get_me))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, ActiveUser, AuthUser, AuthenticatedUser};
