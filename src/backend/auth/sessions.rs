/**
 * Access Tokens
 *
 * This module mints and verifies the compact HS256 JWTs handed out at login.
 * Claims on the wire are `sub`, `iat` and `exp` (unix seconds).
 *
 * Expiry is not delegated to `jsonwebtoken`: the library check is switched
 * off and `exp` is compared against the injected [`Clock`], strictly and with
 * zero leeway. A token is expired once `now >= exp`.
 */

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::clock::Clock;
use crate::backend::auth::failure::AuthError;

/// JWT claims structure written at issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's `subject_id`)
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims as read back from a presented token
///
/// Everything is optional so that a missing claim is reported as a
/// malformed token by the validation pipeline instead of a decode error.
#[derive(Debug, Deserialize)]
struct PresentedClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// A freshly minted access token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Compact JWT (`header.claims.signature`)
    pub token: String,
    /// Copy of the subject at issuance time
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Remaining lifetime at issuance, in whole seconds
    pub fn lifetime_secs(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("subject", &self.subject)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Signs and verifies access tokens with one symmetric secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service for `secret`
    ///
    /// The secret is fixed for the lifetime of the service.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Current time as seen by this service
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now_utc()
    }

    /// Mint a token for `subject` valid for `ttl`
    ///
    /// # Arguments
    /// * `subject` - The user's `subject_id`
    /// * `ttl` - Absolute lifetime; there is no refresh
    ///
    /// # Returns
    /// The signed token with its issuance and expiry instants
    pub fn mint(&self, subject: &str, ttl: Duration) -> Result<AccessToken, AuthError> {
        let now = self.clock.now_utc();
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("token ttl out of range: {}", ttl)))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding: {}", e)))?;

        Ok(AccessToken {
            token,
            subject: claims.sub,
            issued_at: from_unix(claims.iat)?,
            expires_at: from_unix(claims.exp)?,
        })
    }

    /// Verify signature and expiry and return the subject
    ///
    /// Stages run in order and the first failure is returned:
    /// 1. parse + signature (`MalformedOrUntrustedToken`)
    /// 2. expiry against the clock (`TokenExpired`)
    /// 3. subject present (`MalformedOrUntrustedToken`)
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<PresentedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token rejected at signature stage: {:?}", e.kind());
                AuthError::MalformedOrUntrustedToken
            })?;

        let exp = data.claims.exp.ok_or_else(|| {
            tracing::debug!("Token has no exp claim");
            AuthError::MalformedOrUntrustedToken
        })?;
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .ok_or(AuthError::MalformedOrUntrustedToken)?;

        if self.clock.now_utc() >= expires_at {
            return Err(AuthError::TokenExpired);
        }

        data.claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| {
                tracing::debug!("Token has no sub claim");
                AuthError::MalformedOrUntrustedToken
            })
    }
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::Internal(format!("timestamp out of range: {}", secs)))
}
