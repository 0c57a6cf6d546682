/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers and
 * middleware. Lower layers keep their own precise errors (`AuthError`,
 * `StoreError`, `SharedError`); this type decides how each one is reported
 * to a client.
 *
 * # Error Categories
 *
 * ## Credential failures
 *
 * `UnknownUser` and `BadCredentials` are reported identically so that a
 * caller cannot tell which usernames exist.
 *
 * ## Token failures
 *
 * `MalformedOrUntrustedToken`, `TokenExpired` and `UnknownSubject` are
 * likewise collapsed into one response. The precise reason is logged, never
 * returned.
 *
 * ## Everything else
 *
 * Validation problems are 400, conflicts 409, infrastructure failures 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::failure::AuthError;
use crate::backend::db::StoreError;
use crate::shared::SharedError;

/// Body message for rejected username/password pairs
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";

/// Body message for rejected tokens
pub const INVALID_TOKEN: &str = "Could not validate credentials";

/// Body message for disabled accounts
pub const INACTIVE_USER: &str = "Inactive user";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use tokengate::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Movie not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. not found, bad input)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Authentication or token validation was rejected
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Rejected request input
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 404
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Auth` - 401 for credential and token failures, 400 for a disabled
    ///   account, 500 for internal failures
    /// - `Store` - 409 on conflict, 500 otherwise
    /// - `SharedError` - 400
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => match err {
                AuthError::UnknownUser
                | AuthError::BadCredentials
                | AuthError::MalformedOrUntrustedToken
                | AuthError::TokenExpired
                | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
                AuthError::AccountDisabled => StatusCode::BAD_REQUEST,
                AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            Self::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal details (database errors, bcrypt failures) are never exposed.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) if err.is_credential_failure() => INCORRECT_CREDENTIALS.to_string(),
            Self::Auth(err) if err.is_token_failure() => INVALID_TOKEN.to_string(),
            Self::Auth(AuthError::AccountDisabled) => INACTIVE_USER.to_string(),
            Self::Auth(_) => "Internal server error".to_string(),
            Self::Store(err @ StoreError::Conflict { .. }) => err.to_string(),
            Self::Store(StoreError::Database(_)) => "Internal server error".to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }

    /// Whether the response should carry `WWW-Authenticate: Bearer`
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == StatusCode::UNAUTHORIZED
    }
}
