/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Hash password using bcrypt
 * 3. Insert user (the store rejects a taken username)
 * 4. Return the created user
 *
 * Signup does not log the user in; clients call the login endpoint next.
 *
 * # Validation
 *
 * - Username 3-30 chars, starts with a letter, letters/digits/underscore only
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::handlers::types::{SignupRequest, UserResponse};
use crate::backend::auth::users::{NewUser, UserStore};
use crate::backend::error::BackendError;
use crate::shared::SharedError;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate(request: &SignupRequest) -> Result<(), SharedError> {
    if !is_valid_username(&request.username) {
        return Err(SharedError::validation(
            "username",
            "must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }
    if !request.email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Sign up handler
///
/// # Arguments
///
/// * `State(authenticator)` - Auth core (password hashing policy)
/// * `State(users)` - User store
/// * `Json(request)` - Signup request
///
/// # Errors
///
/// * `400 Bad Request` - If any field fails validation
/// * `409 Conflict` - If the username is taken
/// * `500 Internal Server Error` - If hashing or the store fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "bob", "email": "bob@example.com", "password": "secret123"}
/// ```
pub async fn signup(
    State(authenticator): State<Arc<Authenticator>>,
    State(users): State<Arc<dyn UserStore>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    validate(&request).map_err(|e| {
        tracing::warn!("Signup rejected for {}: {}", request.username, e);
        e
    })?;

    let password_hash = authenticator.hash_password(&request.password)?;

    let user = users
        .insert(NewUser {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            password_hash,
            active: true,
        })
        .await
        .map_err(|e| {
            tracing::warn!("Failed to create user: {}", e);
            e
        })?;

    tracing::info!("User created successfully: {}", user.subject_id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
