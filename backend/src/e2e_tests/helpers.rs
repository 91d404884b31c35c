//! Shared setup for the end-to-end tests.

use crate::api;
use crate::auth::credentials::CredentialStore;
use crate::auth::token::TokenService;
use crate::database::Database;
use crate::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"e2e-test-secret";
pub const TEST_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Builds the router over a fresh single-connection in-memory database.
pub async fn test_app() -> Router {
    api::router(test_state().await)
}

pub async fn test_state() -> AppState {
    let db = Database::connect("sqlite::memory:", 1, 3)
        .await
        .expect("in-memory database");
    AppState::new(
        db.pool,
        TokenService::new(TEST_SECRET, TEST_TTL_SECONDS).expect("token service"),
        CredentialStore::new(4).expect("credential store"),
    )
}

/// Sends one request and returns the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

/// Sends a request with a raw `Authorization` header value.
pub async fn send_with_authorization(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

/// Registers a user and returns its token and id.
pub async fn register(app: &Router, username: &str, email: &str, password: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": username, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let token = body["data"]["token"].as_str().expect("token").to_string();
    let id = body["data"]["user"]["id"].as_i64().expect("user id");
    (token, id)
}

/// Flips the final character of a token to a different base64url character.
pub fn alter_last_char(token: &str) -> String {
    let mut altered = token.to_string();
    let last = altered.pop().expect("non-empty token");
    altered.push(if last == 'A' { 'B' } else { 'A' });
    altered
}
