// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user profile and score routes (require authentication).
//!
//! Every route is scoped to the caller: the `:userId` path segment must
//! belong to the holder of the access token.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::score::parse_day;
use crate::models::{DailyScore, ScoreEvent, UserProfile};
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}", get(get_user))
        .route(
            "/users/{user_id}/collect-points/{mission_id}",
            patch(collect_points),
        )
        .route("/users/{user_id}/total-score", get(total_score))
        .route("/users/{user_id}/score/{date}", get(score_for_day))
        .route("/users/{user_id}/score-history", get(score_history))
        .route("/users/{user_id}/reset-score", post(reset_score))
}

// ─── User Profile ────────────────────────────────────────────

/// Profile with the embedded score log.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub scores: Vec<ScoreEvent>,
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    // Other users' profiles are private
    if auth.user_id != user_id {
        return Err(AppError::Forbidden);
    }

    let (profile, scores) = state.scores.user_with_scores(&user_id).await?;
    Ok(ApiResponse::ok("User found", UserResponse { profile, scores }))
}

// ─── Scores ──────────────────────────────────────────────────

async fn collect_points(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((user_id, mission_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ScoreEvent>>> {
    auth.require_owner(&user_id)?;

    let event = state.scores.collect(&user_id, &mission_id).await?;
    let message = format!("Good job! {} points collected", event.points);
    Ok(ApiResponse::ok(message, event))
}

async fn total_score(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<u64>>> {
    auth.require_owner(&user_id)?;

    let total = state.scores.total(&user_id).await?;
    Ok(ApiResponse::ok(
        format!("Your total score is {}", total),
        total,
    ))
}

async fn score_for_day(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((user_id, date)): Path<(String, String)>,
) -> Result<Json<ApiResponse<u64>>> {
    auth.require_owner(&user_id)?;

    let day = parse_day(&date).ok_or_else(|| {
        AppError::BadRequest("Invalid date: expected YYYY-MM-DD".to_string())
    })?;

    let points = state.scores.score_on(&user_id, day).await?;
    Ok(ApiResponse::ok(
        format!("Your total score on {} is {} points", day, points),
        points,
    ))
}

async fn score_history(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DailyScore>>>> {
    auth.require_owner(&user_id)?;

    let history = state.scores.history(&user_id).await?;
    Ok(ApiResponse::ok("Score history found", history))
}

async fn reset_score(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    auth.require_owner(&user_id)?;

    state.scores.reset(&user_id).await?;
    Ok(ApiResponse::ok("User score has been reset to zero", ()))
}
