// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Login details do not match")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error envelope; same shape as successful responses.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    response: serde_json::Value,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, response) = match &self {
            AppError::Unauthorized => (
                StatusCode::FORBIDDEN,
                "Please log in".to_string(),
                serde_json::Value::Null,
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden".to_string(),
                serde_json::Value::Null,
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, msg.clone(), serde_json::Value::Null)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), serde_json::Value::Null)
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                serde_json::to_value(errors).unwrap_or(serde_json::Value::Null),
            ),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Could not login, login details do not match".to_string(),
                serde_json::Value::Null,
            ),
            AppError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "Registration failed".to_string(),
                serde_json::Value::Null,
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, please try again later".to_string(),
                    serde_json::Value::Null,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, please try again later".to_string(),
                    serde_json::Value::Null,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            message,
            response,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
