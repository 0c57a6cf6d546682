//! tokengate
//!
//! Password login and stateless access-token validation for an Axum service.
//!
//! # Overview
//!
//! - **`shared`** - Configuration and input-validation errors; no HTTP types
//! - **`backend`** - The auth core, stores, middleware, handlers and server
//!
//! A client logs in with a username and password and receives an HS256
//! token with a fixed lifetime. Every protected request presents that token
//! (bearer header or `access_token` cookie); the server checks signature,
//! expiry and that the subject still exists, then hands the resolved user to
//! the handler.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
