/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. Public auth routes (signup, login)
 * 3. Protected routes (me, movies) behind the auth middleware
 * 4. Fallback handler (404)
 *
 * Every request is traced through `tower_http::trace::TraceLayer`.
 */

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_auth_routes, configure_protected_routes};
use crate::backend::server::state::AppState;

/// Create the main router with all routes
///
/// # Arguments
/// * `app_state` - Shared application state
///
/// # Returns
/// A router with state applied, ready to serve
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_auth_routes(router);
    let router = configure_protected_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}
