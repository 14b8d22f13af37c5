// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Score collection and aggregation.
//!
//! Collecting a mission appends one [`ScoreEvent`]; totals, daily scores
//! and history are all derived from the event log on each read.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::score::{self, DailyScore};
use crate::models::{ScoreEvent, UserProfile};
use chrono::NaiveDate;

/// Collect mission points and compute score aggregates.
#[derive(Clone)]
pub struct ScoreService {
    db: Database,
}

impl ScoreService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record that `user_id` completed `mission_id`.
    ///
    /// Repeat collections of the same mission are allowed; each one adds
    /// a new event.
    pub async fn collect(&self, user_id: &str, mission_id: &str) -> Result<ScoreEvent> {
        if self.db.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let mission = self
            .db
            .get_mission(mission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mission not found".to_string()))?;

        let event = ScoreEvent {
            id: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            mission_id: mission.id,
            mission_title: mission.title,
            points: mission.points,
            created_at: chrono::Utc::now(),
        };

        self.db.append_score_event(&event).await?;

        tracing::info!(
            user_id,
            mission_id,
            points = event.points,
            "Mission points collected"
        );
        Ok(event)
    }

    /// Sum of all collected points (0 if none).
    pub async fn total(&self, user_id: &str) -> Result<u64> {
        let events = self.db.score_events_for_user(user_id).await?;
        Ok(score::total_points(&events))
    }

    /// Sum of points collected on a UTC calendar day.
    ///
    /// A day with no events is reported as not found, not as zero.
    pub async fn score_on(&self, user_id: &str, date: NaiveDate) -> Result<u64> {
        let events = self.db.score_events_for_user(user_id).await?;
        score::points_on(&events, date).ok_or_else(|| {
            AppError::NotFound("Score for the specified date not found".to_string())
        })
    }

    /// Per-day totals, oldest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<DailyScore>> {
        let events = self.db.score_events_for_user(user_id).await?;
        Ok(score::points_by_day(&events))
    }

    /// Remove every score event for the user.
    pub async fn reset(&self, user_id: &str) -> Result<usize> {
        let count = self.db.clear_score_events(user_id).await?;
        tracing::info!(user_id, count, "Score reset");
        Ok(count)
    }

    /// Public profile plus the user's score events.
    pub async fn user_with_scores(&self, user_id: &str) -> Result<(UserProfile, Vec<ScoreEvent>)> {
        let user = self
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User could not be found".to_string()))?;
        let events = self.db.score_events_for_user(user_id).await?;
        Ok((user.profile(), events))
    }
}
