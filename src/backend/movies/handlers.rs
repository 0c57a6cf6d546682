/**
 * Movie Handlers
 *
 * Owner-scoped CRUD under /api/movies. All routes require an active user;
 * a movie id owned by someone else is answered exactly like a missing one.
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::ActiveUser;
use crate::backend::movies::model::{Movie, MovieDraft, MovieStore};

const MOVIE_NOT_FOUND: &str = "Movie not found";

/// GET /api/movies
pub async fn list_movies(
    State(movies): State<Arc<dyn MovieStore>>,
    ActiveUser(current): ActiveUser,
) -> Result<Json<Vec<Movie>>, BackendError> {
    let list = movies.list_for_owner(current.subject_id()).await?;
    tracing::debug!("Listing {} movie(s) for {}", list.len(), current.subject_id());
    Ok(Json(list))
}

/// POST /api/movies
///
/// # Errors
///
/// * `400 Bad Request` - If the name is shorter than 4 characters
pub async fn create_movie(
    State(movies): State<Arc<dyn MovieStore>>,
    ActiveUser(current): ActiveUser,
    Json(draft): Json<MovieDraft>,
) -> Result<(StatusCode, Json<Movie>), BackendError> {
    draft.validate()?;
    let movie = movies.create(current.subject_id(), draft).await?;
    tracing::info!("Movie {} created by {}", movie.id, current.subject_id());
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(movies): State<Arc<dyn MovieStore>>,
    ActiveUser(current): ActiveUser,
    Path(id): Path<i64>,
) -> Result<Json<Movie>, BackendError> {
    movies
        .get(current.subject_id(), id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(MOVIE_NOT_FOUND))
}

/// PUT /api/movies/{id}
///
/// Replaces every field and returns the updated movie.
pub async fn update_movie(
    State(movies): State<Arc<dyn MovieStore>>,
    ActiveUser(current): ActiveUser,
    Path(id): Path<i64>,
    Json(draft): Json<MovieDraft>,
) -> Result<Json<Movie>, BackendError> {
    draft.validate()?;
    let movie = movies
        .update(current.subject_id(), id, draft)
        .await?
        .ok_or_else(|| BackendError::not_found(MOVIE_NOT_FOUND))?;
    tracing::info!("Movie {} updated by {}", id, current.subject_id());
    Ok(Json(movie))
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    State(movies): State<Arc<dyn MovieStore>>,
    ActiveUser(current): ActiveUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    if !movies.delete(current.subject_id(), id).await? {
        return Err(BackendError::not_found(MOVIE_NOT_FOUND));
    }
    tracing::info!("Movie {} deleted by {}", id, current.subject_id());
    Ok(StatusCode::NO_CONTENT)
}
