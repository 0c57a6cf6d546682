//! Shared Error Types
//!
//! This module defines error types that do not depend on the HTTP layer.
//! They describe malformed client input that is rejected before any
//! authentication or storage work happens.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed a format or length rule
//!
//! # Usage
//!
//! ```rust
//! use tokengate::shared::error::SharedError;
//!
//! let error = SharedError::validation("password", "Password must be at least 8 characters");
//! ```
use thiserror::Error;

/// Input errors shared by every request handler
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
