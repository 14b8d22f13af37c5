// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mission catalog service.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Mission, NewMission};
use validator::Validate;

/// Read and extend the mission catalog.
#[derive(Clone)]
pub struct MissionService {
    db: Database,
}

impl MissionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Full catalog, ordered by title.
    pub async fn list(&self) -> Result<Vec<Mission>> {
        self.db.list_missions().await
    }

    /// Add a mission to the catalog. Titles are not required to be unique.
    pub async fn create(&self, mut payload: NewMission) -> Result<Mission> {
        payload.title = payload.title.trim().to_string();
        payload.validate()?;

        let mission = payload.into_mission(uuid::Uuid::new_v4().simple().to_string());
        self.db.insert_mission(&mission).await?;

        tracing::info!(
            mission_id = %mission.id,
            points = mission.points,
            "Mission created"
        );
        Ok(mission)
    }

    /// Look up a single mission.
    pub async fn get(&self, mission_id: &str) -> Result<Mission> {
        self.db
            .get_mission(mission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mission could not be found".to_string()))
    }
}
