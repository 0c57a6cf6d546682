//! Movies API integration tests
//!
//! Owner-scoped CRUD behind the auth middleware.

mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{TestApp, PASSWORD};

fn movie(name: &str, year: i64, rating: f64) -> serde_json::Value {
    json!({ "name": name, "year": year, "rating": rating })
}

async fn crud_flow(app: TestApp) {
    let token = app.register("bob").await;

    let created = app
        .call(Method::POST, "/api/movies", Some(&token), Some(movie("Alien", 1979, 8.5)))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert_eq!(created["name"], "Alien");
    assert_eq!(created["owner"], "bob");
    let id = created["id"].as_i64().unwrap();

    let list = app.get("/api/movies", Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.json().as_array().unwrap().len(), 1);

    let uri = format!("/api/movies/{}", id);
    let fetched = app.get(&uri, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);

    let updated = app
        .call(Method::PUT, &uri, Some(&token), Some(movie("Aliens", 1986, 8.4)))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["name"], "Aliens");
    assert_eq!(updated.json()["year"], 1986);
    assert_eq!(app.get(&uri, Some(&token)).await.json()["name"], "Aliens");

    let deleted = app.call(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, Some(&token)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_crud_in_memory() {
    crud_flow(TestApp::new().await).await;
}

#[tokio::test]
async fn test_crud_sqlite() {
    crud_flow(TestApp::with_sqlite().await).await;
}

#[tokio::test]
async fn test_requires_authentication() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/api/movies", None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.call(Method::POST, "/api/movies", None, Some(movie("Alien", 1979, 8.5)))
            .await
            .status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.get("/api/movies/1", Some("garbage")).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_rejected() {
    let app = TestApp::new().await;
    app.insert_user("alice", PASSWORD, false).await;
    let token = app.state.authenticator.issue_default_token("alice").unwrap().token;

    let response = app.get("/api/movies", Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Inactive user");
}

#[tokio::test]
async fn test_other_owners_movies_are_invisible() {
    let app = TestApp::new().await;
    let bob = app.register("bob").await;
    let alice = app.register("alice").await;

    let created = app
        .call(Method::POST, "/api/movies", Some(&alice), Some(movie("Amelie", 2001, 8.3)))
        .await
        .json();
    let uri = format!("/api/movies/{}", created["id"]);

    assert_eq!(app.get(&uri, Some(&bob)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.call(Method::PUT, &uri, Some(&bob), Some(movie("Hijacked", 2001, 1.0)))
            .await
            .status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.call(Method::DELETE, &uri, Some(&bob), None).await.status,
        StatusCode::NOT_FOUND
    );
    assert!(app.get("/api/movies", Some(&bob)).await.json().as_array().unwrap().is_empty());

    let still_there = app.get(&uri, Some(&alice)).await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.json()["name"], "Amelie");
}

#[tokio::test]
async fn test_name_validation() {
    let app = TestApp::new().await;
    let token = app.register("bob").await;

    let response = app
        .call(Method::POST, "/api/movies", Some(&token), Some(movie("Up", 2009, 8.3)))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let created = app
        .call(Method::POST, "/api/movies", Some(&token), Some(movie("Heat", 1995, 8.3)))
        .await
        .json();
    let uri = format!("/api/movies/{}", created["id"]);
    let response = app
        .call(Method::PUT, &uri, Some(&token), Some(movie("Up", 2009, 8.3)))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(&uri, Some(&token)).await.json()["name"], "Heat");
}

#[tokio::test]
async fn test_delete_me_removes_owned_movies() {
    let app = TestApp::new().await;
    let bob = app.register("bob").await;
    let alice = app.register("alice").await;

    for name in ["Vertigo", "Psycho"] {
        app.call(Method::POST, "/api/movies", Some(&bob), Some(movie(name, 1960, 8.5)))
            .await;
    }
    app.call(Method::POST, "/api/movies", Some(&alice), Some(movie("Rebecca", 1940, 8.1)))
        .await;

    let response = app.call(Method::DELETE, "/api/auth/me", Some(&bob), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert!(app.state.movies.list_for_owner("bob").await.unwrap().is_empty());
    assert_eq!(app.state.movies.list_for_owner("alice").await.unwrap().len(), 1);
}
