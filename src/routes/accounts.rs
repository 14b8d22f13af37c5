// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use crate::error::Result;
use crate::routes::ApiResponse;
use crate::services::{LoginRequest, RegisterRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Account created by registration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub id: String,
    pub access_token: String,
}

/// Credentials returned on login.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub email: String,
    pub id: String,
    pub access_token: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    let Json(request) = payload?;
    let user = state.accounts.register(request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(
            "Registration successful",
            RegisterResponse {
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                id: user.id,
                access_token: user.access_token,
            },
        ),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    let Json(request) = payload?;
    let user = state.accounts.login(request).await?;

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            email: user.email,
            id: user.id,
            access_token: user.access_token,
        },
    ))
}
