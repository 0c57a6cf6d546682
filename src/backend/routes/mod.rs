//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Auth and movie endpoints
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /health` - Liveness check
//! - `POST /api/auth/signup` - User registration
//! - `POST /api/auth/login` - User login
//!
//! ## Authenticated
//!
//! - `GET /api/auth/me`, `DELETE /api/auth/me`
//! - `GET /api/movies`, `POST /api/movies`
//! - `GET /api/movies/{id}`, `PUT /api/movies/{id}`, `DELETE /api/movies/{id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use tokengate::backend::routes::create_router;
//!
//! let app = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
