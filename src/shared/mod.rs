//! Shared Module
//!
//! This module contains types that are independent of the HTTP server:
//! configuration loading and the input validation error type. Both the
//! binary and the library's backend depend on it.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, TokenTransport};
