//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the same router (middleware stack included) that production
//! uses, plus request helpers that send through `tower::ServiceExt` and
//! token helpers for the external-identity-provider JWTs.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use aidex_api::auth::jwt::{create_token, JwtConfig};
use aidex_api::config::ServerConfig;
use aidex_api::router::build_app_router;
use aidex_api::state::AppState;
use aidex_db::repositories::UserRoleRepo;

const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors `main.rs` exactly via the shared
/// router builder.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `user_id` with the test secret.
pub fn token_for(user_id: &str) -> String {
    create_token(user_id, &test_config().jwt, 3600).expect("failed to mint test token")
}

/// Grant the admin role to `user_id` directly through the repository.
pub async fn seed_admin(pool: &PgPool, user_id: &str) {
    UserRoleRepo::grant_admin(pool, user_id)
        .await
        .expect("failed to seed admin role");
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, path: &str) -> Response {
    send(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response {
    send(app, Method::POST, path, token, Some(json)).await
}

pub async fn put_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response {
    send(app, Method::PUT, path, token, Some(json)).await
}

pub async fn put_empty(app: &Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::PUT, path, token, None).await
}

pub async fn delete(app: &Router, path: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, path, token, None).await
}

/// Collect the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
