//! Common test utilities and helpers
//!
//! Builds the full router over in-memory (or SQLite in-memory) stores with a
//! manual clock, and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

use tokengate::backend::auth::{ManualClock, NewUser};
use tokengate::backend::routes::create_router;
use tokengate::backend::server::{load_stores, AppState, Stores};
use tokengate::shared::{AppConfig, TokenTransport};

pub const TEST_SECRET: &str = "d2c5d48991e5f6ffe09e659a805813717313a13bb005d9a7055623c02cfc7f31";

/// Default password used by `register`
pub const PASSWORD: &str = "secret123";

/// A response with its body already collected
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The application under test
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: ManualClock,
}

impl TestApp {
    /// In-memory stores, bearer header transport
    pub async fn new() -> Self {
        Self::build(TokenTransport::Header, Stores::in_memory()).await
    }

    pub async fn with_transport(transport: TokenTransport) -> Self {
        Self::build(transport, Stores::in_memory()).await
    }

    /// SQLite in-memory database, bearer header transport
    pub async fn with_sqlite() -> Self {
        let stores = load_stores(Some("sqlite::memory:")).await;
        Self::build(TokenTransport::Header, stores).await
    }

    async fn build(transport: TokenTransport, stores: Stores) -> Self {
        let config = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            .bcrypt_cost(4)
            .transport(transport)
            .build()
            .expect("test config is valid");
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 10, 9, 30, 0).unwrap());
        let state = AppState::new(&config, stores.users, stores.movies, Arc::new(clock.clone()));
        let router = create_router(state.clone());
        Self { router, state, clock }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        TestResponse { status, headers, body }
    }

    /// Request with an optional bearer token and optional JSON body
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        json: Option<serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }
        let body = match json {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn signup(&self, username: &str, password: &str) -> TestResponse {
        self.call(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let form = format!("username={}&password={}", username, password);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    /// Sign up `username` with `PASSWORD` and return a fresh token
    pub async fn register(&self, username: &str) -> String {
        let signup = self.signup(username, PASSWORD).await;
        assert_eq!(signup.status, StatusCode::CREATED, "{}", signup.text());
        let login = self.login(username, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.text());
        login.json()["access_token"]
            .as_str()
            .expect("access_token is a string")
            .to_string()
    }

    /// Insert a user straight into the store, bypassing signup
    pub async fn insert_user(&self, username: &str, password: &str, active: bool) {
        let password_hash = self.state.authenticator.hash_password(password).unwrap();
        self.state
            .users
            .insert(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                full_name: None,
                password_hash,
                active,
            })
            .await
            .unwrap();
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
