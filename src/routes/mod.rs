// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod accounts;
pub mod missions;
pub mod users;

use crate::middleware::auth::require_auth;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Envelope wrapping every JSON response body.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub response: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response with a message and payload.
    pub fn ok(message: impl Into<String>, response: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            response,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Every route served, for the index listing.
pub const ENDPOINTS: &[(&str, &[&str])] = &[
    ("/", &["GET"]),
    ("/health", &["GET"]),
    ("/register", &["POST"]),
    ("/login", &["POST"]),
    ("/missions", &["GET", "POST"]),
    ("/missions/:missionId", &["GET"]),
    ("/users/:userId", &["GET"]),
    ("/users/:userId/collect-points/:missionId", &["PATCH"]),
    ("/users/:userId/total-score", &["GET"]),
    ("/users/:userId/score/:date", &["GET"]),
    ("/users/:userId/score-history", &["GET"]),
    ("/users/:userId/reset-score", &["POST"]),
];

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub methods: Vec<&'static str>,
}

/// List the API's endpoints.
async fn list_endpoints() -> Json<Vec<EndpointInfo>> {
    Json(
        ENDPOINTS
            .iter()
            .map(|&(path, methods)| EndpointInfo {
                path,
                methods: methods.to_vec(),
            })
            .collect(),
    )
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(list_endpoints))
        .route("/health", get(health_check))
        .merge(accounts::routes());

    // Protected routes (access token required)
    let protected_routes = Router::new()
        .merge(missions::routes())
        .merge(users::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
