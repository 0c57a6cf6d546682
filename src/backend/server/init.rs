/**
 * Server Initialization
 *
 * This module builds the application from a validated configuration.
 *
 * # Initialization Process
 *
 * 1. Open stores (SQLite when `DATABASE_URL` is set, otherwise in-memory)
 * 2. Build the auth core and credential extractor
 * 3. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::clock::SystemClock;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_stores;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create the application router
///
/// # Arguments
/// * `config` - Validated configuration (secret, TTL, transport, database)
pub async fn create_app(config: &AppConfig) -> Router<()> {
    tracing::info!("Initializing tokengate server");
    tracing::debug!("Configuration: {:?}", config);

    let stores = load_stores(config.database_url.as_deref()).await;
    let app_state = AppState::new(config, stores.users, stores.movies, Arc::new(SystemClock));

    tracing::info!(
        "Auth core ready (token ttl {} min, transport {:?})",
        config.token_ttl_minutes,
        config.transport
    );

    create_router(app_state)
}
