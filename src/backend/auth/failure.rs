/**
 * Authentication Failure Taxonomy
 *
 * Every rejection the auth core can produce. All variants are terminal:
 * password and signature checks are deterministic, so nothing here is
 * retried. At the HTTP boundary the credential failures collapse into one
 * response and the token failures collapse into another (see
 * `backend::error`), which keeps usernames from being enumerated.
 */

use thiserror::Error;

/// Reason an authentication or token validation attempt was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No account exists for the submitted username
    #[error("unknown user")]
    UnknownUser,

    /// The password did not match the stored hash
    #[error("bad credentials")]
    BadCredentials,

    /// The account exists but is disabled
    #[error("account disabled")]
    AccountDisabled,

    /// The token could not be parsed, failed signature verification, or
    /// lacks a required claim
    #[error("malformed or untrusted token")]
    MalformedOrUntrustedToken,

    /// The token's `exp` is not in the future
    #[error("token expired")]
    TokenExpired,

    /// The token's subject no longer resolves to a user
    #[error("unknown subject")]
    UnknownSubject,

    /// Hashing or signing failed; not a client error
    #[error("credential processing failed: {0}")]
    Internal(String),
}

impl AuthError {
    /// Failures of a username/password check
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::UnknownUser | Self::BadCredentials)
    }

    /// Failures of presented-token validation
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedOrUntrustedToken | Self::TokenExpired | Self::UnknownSubject
        )
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("bcrypt: {}", err))
    }
}
