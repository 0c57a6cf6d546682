//! Server Module
//!
//! Initialization and wiring of the Axum HTTP server.
//!
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`config`** - Store selection (SQLite or in-memory)
//! - **`init`** - `create_app`
//!
//! # Initialization Flow
//!
//! 1. **Store Loading**: opens SQLite if `DATABASE_URL` is set, else in-memory
//! 2. **State Creation**: builds the `Authenticator` and credential extractor
//! 3. **Router Creation**: configures all routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use tokengate::backend::server::create_app;
//! use tokengate::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Store configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{load_stores, Stores};
pub use init::create_app;
pub use state::AppState;
