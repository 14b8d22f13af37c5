// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mission catalog routes (require authentication).

use crate::error::Result;
use crate::models::{Mission, NewMission};
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/missions", get(list_missions).post(create_mission))
        .route("/missions/{mission_id}", get(get_mission))
}

async fn list_missions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Mission>>>> {
    let missions = state.missions.list().await?;
    tracing::debug!(count = missions.len(), "Listing missions");
    Ok(ApiResponse::ok("Missions found", missions))
}

async fn create_mission(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewMission>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Mission>>)> {
    let Json(new_mission) = payload?;
    let mission = state.missions.create(new_mission).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("New mission successfully created", mission),
    ))
}

async fn get_mission(
    State(state): State<Arc<AppState>>,
    Path(mission_id): Path<String>,
) -> Result<Json<ApiResponse<Mission>>> {
    let mission = state.missions.get(&mission_id).await?;
    Ok(ApiResponse::ok("Mission found", mission))
}
