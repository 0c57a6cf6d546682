/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - the `Authenticator` (issuer + validator)
 * - the user and movie stores, behind trait objects
 * - the credential extractor chosen by the configured token transport
 *
 * Everything is behind `Arc`, so cloning the state per request is cheap and
 * nothing in it needs a lock: the stores synchronize internally and the auth
 * core is immutable.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract only the part of
 * the state they need.
 *
 * ```rust,ignore
 * async fn handler(State(users): State<Arc<dyn UserStore>>) { /* ... */ }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::authenticator::{AuthSettings, Authenticator};
use crate::backend::auth::clock::Clock;
use crate::backend::auth::extractor::{from_transport, CredentialExtractor};
use crate::backend::auth::users::UserStore;
use crate::backend::movies::MovieStore;
use crate::shared::{AppConfig, TokenTransport};

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,

    pub users: Arc<dyn UserStore>,

    pub movies: Arc<dyn MovieStore>,

    pub extractor: Arc<dyn CredentialExtractor>,

    pub transport: TokenTransport,
}

impl AppState {
    /// Assemble state from configuration and already-opened stores
    ///
    /// # Arguments
    /// * `config` - Validated application configuration
    /// * `users` - User store shared by the auth core and the handlers
    /// * `movies` - Movie store
    /// * `clock` - Time source for token minting and validation
    pub fn new(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let authenticator = Authenticator::new(
            users.clone(),
            config.jwt_secret.as_bytes(),
            AuthSettings::from_config(config),
            clock,
        );

        Self {
            authenticator: Arc::new(authenticator),
            users,
            movies,
            extractor: Arc::from(from_transport(config.transport)),
            transport: config.transport,
        }
    }
}

impl FromRef<AppState> for Arc<Authenticator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.authenticator.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MovieStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.movies.clone()
    }
}

impl FromRef<AppState> for TokenTransport {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.transport
    }
}
