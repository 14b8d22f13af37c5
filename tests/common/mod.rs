// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use mission_tracker::config::Config;
use mission_tracker::db::Database;
use mission_tracker::routes::create_router;
use mission_tracker::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test app backed by an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Database::in_memory(),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app whose database fails every call.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    let state = Arc::new(AppState::new(Config::test_default(), Database::new_mock()));
    create_router(state)
}

/// Send a request and decode the JSON body (Null if empty or not JSON).
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Register a user and return (id, access token).
#[allow(dead_code)]
pub async fn register_user(app: &axum::Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": "longenough"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    (
        body["response"]["id"].as_str().unwrap().to_string(),
        body["response"]["accessToken"].as_str().unwrap().to_string(),
    )
}

/// Create a mission and return its id.
#[allow(dead_code)]
pub async fn create_mission(app: &axum::Router, token: &str, title: &str, points: u32) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/missions",
        Some(token),
        Some(json!({ "title": title, "points": points })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "create mission failed: {}",
        body
    );

    body["response"]["id"].as_str().unwrap().to_string()
}
