/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Verify username and password (`Authenticator::authenticate`)
 * 2. Reject disabled accounts (`Authenticator::require_active`)
 * 3. Mint a token with the configured TTL
 * 4. Return the token, and set it as a cookie when cookie transport is on
 *
 * # Security
 *
 * - Unknown user and wrong password produce byte-identical 401 responses
 * - The cookie is `HttpOnly` and `SameSite=Lax`, and expires with the token
 */

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Json, Response},
    Form,
};

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::extractor::ACCESS_TOKEN_COOKIE;
use crate::backend::auth::handlers::types::{LoginForm, TokenResponse};
use crate::backend::auth::sessions::AccessToken;
use crate::backend::error::BackendError;
use crate::shared::TokenTransport;

/// Build the `Set-Cookie` value carrying `token`
pub fn access_token_cookie(token: &AccessToken) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ACCESS_TOKEN_COOKIE,
        token.token,
        token.lifetime_secs()
    )
}

/// Login handler
///
/// # Arguments
///
/// * `State(authenticator)` - Auth core
/// * `State(transport)` - Configured token transport
/// * `Form(form)` - Username and password
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown user or wrong password (same body for both)
/// * `400 Bad Request` - Account is disabled
/// * `500 Internal Server Error` - Token signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=bob&password=secret123
/// ```
///
/// # Example Response
///
/// ```json
/// {"access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "token_type": "Bearer", "expires_in": 900}
/// ```
pub async fn login(
    State(authenticator): State<Arc<Authenticator>>,
    State(transport): State<TokenTransport>,
    Form(form): Form<LoginForm>,
) -> Result<Response, BackendError> {
    tracing::info!("Login request for username: {}", form.username);

    let user = authenticator
        .authenticate(&form.username, &form.password)
        .await?;
    let user = Authenticator::require_active(user)?;
    let token = authenticator.issue_default_token(&user.subject_id)?;

    tracing::info!("User logged in successfully: {}", user.subject_id);

    let mut response = Json(TokenResponse::from(&token)).into_response();
    if transport.uses_cookie() {
        let cookie = HeaderValue::from_str(&access_token_cookie(&token)).map_err(|e| {
            tracing::error!("Token is not a valid cookie value: {}", e);
            BackendError::handler(
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            )
        })?;
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}
