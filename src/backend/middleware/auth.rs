/**
 * Authentication Middleware
 *
 * This module protects routes that require an authenticated user. The
 * middleware pulls the presented token out of the request with the
 * configured `CredentialExtractor`, runs it through the validation pipeline,
 * and attaches the resolved user to the request extensions for handlers.
 *
 * Handlers then take either extractor:
 * - `AuthUser` - any user holding a valid token
 * - `ActiveUser` - additionally requires the account to be active
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::failure::AuthError;
use crate::backend::auth::users::UserRecord;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from the presented token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: UserRecord,
}

impl AuthenticatedUser {
    pub fn subject_id(&self) -> &str {
        &self.user.subject_id
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from the request (header and/or cookie)
/// 2. Validates signature, expiry and subject
/// 3. Attaches the user to request extensions for use in handlers
///
/// Returns 401 with `WWW-Authenticate: Bearer` if the token is missing or
/// fails validation.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = app_state.extractor.extract(request.headers()).ok_or_else(|| {
        tracing::warn!("No credentials presented for {}", request.uri().path());
        AuthError::MalformedOrUntrustedToken
    })?;

    let user = app_state.authenticator.validate(&token).await?;
    tracing::debug!("Authenticated request as {}", user.subject_id);

    request.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(request).await)
}

fn authenticated_from_parts(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::from(AuthError::MalformedOrUntrustedToken)
        })
}

/// Axum extractor for an authenticated user
///
/// Requires `auth_middleware` on the route. Does not check account status.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(authenticated_from_parts(parts)?))
    }
}

/// Axum extractor for an authenticated, active user
///
/// Disabled accounts are rejected with 400 "Inactive user".
#[derive(Clone, Debug)]
pub struct ActiveUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for ActiveUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authenticated = authenticated_from_parts(parts)?;
        let user = Authenticator::require_active(authenticated.user)?;
        Ok(ActiveUser(AuthenticatedUser { user }))
    }
}
