//! Backend Module
//!
//! All server-side code: the authentication core, persistence, HTTP
//! middleware and handlers, and server wiring.
//!
//! # Architecture
//!
//! - **`auth`** - Credential issuer/validator, token service, user stores
//! - **`movies`** - Owner-scoped movie CRUD (a protected resource)
//! - **`middleware`** - Token validation for protected routes
//! - **`error`** - `BackendError` and its HTTP rendering
//! - **`server`** - Application state, store loading, app creation
//! - **`routes`** - Router assembly
//! - **`db`** - SQLite pool and migrations
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── db.rs           - SQLite connection + StoreError
//! ├── auth/           - Authentication
//! ├── movies/         - Movies resource
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── server/         - Server initialization and state
//! └── routes/         - Route configuration
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `Authenticator`, the user and movie stores (as
//! trait objects) and the credential extractor. It is cloned into every
//! request; nothing in it needs external locking.

pub mod auth;

pub mod db;

pub mod error;

pub mod middleware;

pub mod movies;

pub mod routes;

pub mod server;
