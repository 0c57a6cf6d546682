/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - Password login
 *
 * ## Authenticated
 * - `GET /api/auth/me` - Current user info
 * - `DELETE /api/auth/me` - Delete own account
 * - `GET|POST /api/movies` - List / create own movies
 * - `GET|PUT|DELETE /api/movies/{id}` - Own movie by id
 *
 * Authenticated routes sit behind `auth_middleware` as a route layer, so an
 * unmatched path still falls through to the 404 fallback instead of a 401.
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{delete_me, get_me, login, signup};
use crate::backend::middleware::auth_middleware;
use crate::backend::movies::{create_movie, delete_movie, get_movie, list_movies, update_movie};
use crate::backend::server::state::AppState;

/// Add the public authentication routes
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// Add the routes that require a valid token
pub fn configure_protected_routes(
    router: Router<AppState>,
    app_state: &AppState,
) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me).delete(delete_me))
        .route("/api/movies", get(list_movies).post(create_movie))
        .route(
            "/api/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router.merge(protected)
}
