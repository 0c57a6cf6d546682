//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and how it
//! is rendered as a response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status/message mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use tokengate::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<&'static str>, BackendError> {
//!     Err(BackendError::not_found("Movie not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, INACTIVE_USER, INCORRECT_CREDENTIALS, INVALID_TOKEN};
