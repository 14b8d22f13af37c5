// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login tests.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

mod common;
use common::{create_test_app, register_user, send};

fn registration(email: &str, password: &str) -> Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "email": email,
        "password": password
    })
}

#[tokio::test]
async fn test_register_returns_profile_and_token() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(registration("a@b.com", "longenough")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");

    let response = &body["response"];
    assert_eq!(response["firstName"], "A");
    assert_eq!(response["lastName"], "B");
    assert_eq!(response["email"], "a@b.com");
    assert!(!response["id"].as_str().unwrap().is_empty());
    assert!(!response["accessToken"].as_str().unwrap().is_empty());
    assert!(response.get("password").is_none());
    assert!(response.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_rejects_short_and_long_passwords() {
    let (app, state) = create_test_app();

    for (email, password) in [
        ("short@b.com", "1234567".to_string()),
        ("long@b.com", "x".repeat(31)),
    ] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(registration(email, &password)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["response"].get("password").is_some());

        // No record was created
        assert!(state.db.find_user_by_email(email).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_register_password_boundaries_accepted() {
    let (app, _) = create_test_app();

    for (email, password) in [("eight@b.com", "x".repeat(8)), ("thirty@b.com", "x".repeat(30))] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(registration(email, &password)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_register_duplicate_email_fails() {
    let (app, state) = create_test_app();
    let (first_id, _) = register_user(&app, "dup@b.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(registration("dup@b.com", "anotherpassword")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Registration failed");

    // The original account is untouched and still the one found by email
    let stored = state.db.find_user_by_email("dup@b.com").await.unwrap().unwrap();
    assert_eq!(stored.id, first_id);
}

#[tokio::test]
async fn test_register_rejects_invalid_payloads() {
    let (app, _) = create_test_app();

    // Not an email
    let (status, _) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(registration("not-an-email", "longenough")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing password field
    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "firstName": "A", "lastName": "B", "email": "a@b.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_rejects_blank_names() {
    let (app, state) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "firstName": "  ",
            "lastName": " ",
            "email": "blank@b.com",
            "password": "longenough"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["response"].get("first_name").is_some());
    assert!(body["response"].get("last_name").is_some());
    assert!(state
        .db
        .find_user_by_email("blank@b.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_login_success_returns_same_token() {
    let (app, _) = create_test_app();
    let (id, token) = register_user(&app, "login@b.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "login@b.com", "password": "longenough" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["response"]["id"], id.as_str());
    assert_eq!(body["response"]["email"], "login@b.com");
    assert_eq!(body["response"]["accessToken"], token.as_str());
}

#[tokio::test]
async fn test_login_wrong_password_is_generic() {
    let (app, _) = create_test_app();
    register_user(&app, "login@b.com").await;

    let (wrong_pw_status, wrong_pw) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "login@b.com", "password": "wrongpassword" })),
    )
    .await;
    let (unknown_status, unknown) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "nobody@b.com", "password": "longenough" })),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_pw, unknown);
    assert_eq!(
        wrong_pw["message"],
        "Could not login, login details do not match"
    );
    assert!(!wrong_pw.to_string().to_lowercase().contains("password"));
}
