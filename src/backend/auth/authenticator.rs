/**
 * Credential Issuer and Validator
 *
 * `Authenticator` is the single parameterized auth core. It verifies a
 * username/password pair against the stored bcrypt hash, mints time-bound
 * tokens, and resolves presented tokens back to a user record.
 *
 * # Validation pipeline
 *
 * 1. Parse and verify signature -> `MalformedOrUntrustedToken`
 * 2. Check expiry (UTC, strict) -> `TokenExpired`
 * 3. Extract subject -> `MalformedOrUntrustedToken`
 * 4. Resolve subject in the user store -> `UnknownSubject`
 *
 * The pipeline is linear: each stage advances or terminates, nothing retries.
 *
 * # Account status
 *
 * `authenticate` and `validate` do not look at `active`. Callers that need to
 * enforce it apply [`Authenticator::require_active`] afterwards.
 */

use std::sync::Arc;

use chrono::Duration;

use crate::backend::auth::clock::Clock;
use crate::backend::auth::failure::AuthError;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{AccessToken, TokenService};
use crate::backend::auth::users::{UserRecord, UserStore};
use crate::shared::AppConfig;

/// Knobs that vary between deployments of the auth core
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Lifetime given to tokens minted at login
    pub token_ttl: Duration,
    /// bcrypt work factor for new hashes
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token_ttl: Duration::minutes(config.token_ttl_minutes),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

/// Issues and validates access tokens for users in a `UserStore`
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    passwords: PasswordHasher,
    tokens: TokenService,
    token_ttl: Duration,
    /// Verified against when the username is unknown, so both login
    /// failures cost one bcrypt check at the configured cost
    dummy_hash: Option<String>,
}

impl Authenticator {
    /// Build the auth core
    ///
    /// # Arguments
    /// * `users` - User store consulted on login and on every validation
    /// * `secret` - HS256 signing secret, immutable for the process lifetime
    /// * `settings` - Token TTL and bcrypt cost
    /// * `clock` - Time source for minting and expiry checks
    pub fn new(
        users: Arc<dyn UserStore>,
        secret: &[u8],
        settings: AuthSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let passwords = PasswordHasher::new(settings.bcrypt_cost);
        let dummy_hash = passwords
            .hash("tokengate-unknown-user")
            .map_err(|e| tracing::error!("Could not prepare dummy password hash: {}", e))
            .ok();

        Self {
            users,
            passwords,
            tokens: TokenService::new(secret, clock),
            token_ttl: settings.token_ttl,
            dummy_hash,
        }
    }

    /// Lifetime of tokens minted by [`Authenticator::issue_default_token`]
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a plaintext password under the configured policy
    pub fn hash_password(&self, plaintext: &str) -> Result<String, AuthError> {
        Ok(self.passwords.hash(plaintext)?)
    }

    /// Verify a username/password pair
    ///
    /// # Errors
    /// * `UnknownUser` - no such user, or the store failed
    /// * `BadCredentials` - password mismatch, or an unparsable stored hash
    ///
    /// The two are distinct here for logging; the HTTP layer reports both
    /// identically.
    pub async fn authenticate(
        &self,
        username: &str,
        plaintext_password: &str,
    ) -> Result<UserRecord, AuthError> {
        let user = match self.users.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!("Login rejected, user not found: {}", username);
                self.burn_password_check(plaintext_password);
                return Err(AuthError::UnknownUser);
            }
            Err(e) => {
                tracing::error!("User lookup failed for {}: {}", username, e);
                self.burn_password_check(plaintext_password);
                return Err(AuthError::UnknownUser);
            }
        };

        let valid = self
            .passwords
            .verify(plaintext_password, &user.password_hash)
            .unwrap_or_else(|e| {
                tracing::error!("Stored password hash for {} is unusable: {}", username, e);
                false
            });

        if !valid {
            tracing::warn!("Login rejected, invalid password for user: {}", username);
            return Err(AuthError::BadCredentials);
        }

        tracing::debug!("Credentials verified for {}", username);
        Ok(user)
    }

    /// Mint a token for `subject_id` valid for `ttl`
    pub fn issue_token(&self, subject_id: &str, ttl: Duration) -> Result<AccessToken, AuthError> {
        let token = self.tokens.mint(subject_id, ttl)?;
        tracing::info!(
            "Issued access token for {} expiring at {}",
            subject_id,
            token.expires_at.to_rfc3339()
        );
        Ok(token)
    }

    /// Mint a token with the configured TTL
    pub fn issue_default_token(&self, subject_id: &str) -> Result<AccessToken, AuthError> {
        self.issue_token(subject_id, self.token_ttl)
    }

    /// Resolve a presented token to its user
    pub async fn validate(&self, presented_token: &str) -> Result<UserRecord, AuthError> {
        let subject = self.tokens.verify(presented_token).map_err(|e| {
            tracing::warn!("Token rejected: {}", e);
            e
        })?;

        match self.users.find_by_subject_id(&subject).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::warn!("Token subject no longer exists: {}", subject);
                Err(AuthError::UnknownSubject)
            }
            Err(e) => {
                tracing::error!("Subject lookup failed for {}: {}", subject, e);
                Err(AuthError::UnknownSubject)
            }
        }
    }

    /// Spend the same bcrypt work a real password check would
    ///
    /// Returns whether a check actually ran.
    fn burn_password_check(&self, plaintext_password: &str) -> bool {
        match &self.dummy_hash {
            Some(hash) => {
                let _ = self.passwords.verify(plaintext_password, hash);
                true
            }
            None => false,
        }
    }

    /// Pass `user` through only if the account is active
    pub fn require_active(user: UserRecord) -> Result<UserRecord, AuthError> {
        if user.active {
            Ok(user)
        } else {
            tracing::warn!("Rejected disabled account: {}", user.subject_id);
            Err(AuthError::AccountDisabled)
        }
    }
}
