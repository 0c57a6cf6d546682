//! Movies Module
//!
//! A per-user movie list: the protected resource behind the auth middleware.
//!
//! - **`model`** - `Movie`, `MovieDraft`, the `MovieStore` contract and the
//!   in-memory store
//! - **`db`** - SQLite `MovieStore`
//! - **`handlers`** - HTTP handlers under /api/movies

pub mod model;

pub mod db;

pub mod handlers;

pub use db::SqliteMovieStore;
pub use handlers::{create_movie, delete_movie, get_movie, list_movies, update_movie};
pub use model::{InMemoryMovieStore, Movie, MovieDraft, MovieStore};
