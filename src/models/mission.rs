// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mission catalog model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Upper bound on the points a single mission can award.
pub const MAX_MISSION_POINTS: u32 = 1_000_000;

/// Catalog entry stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Mission {
    /// Opaque mission ID (also used as document ID)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Optional free-form hints shown with the mission
    #[serde(default)]
    pub extra_info: Option<String>,
    /// Points awarded each time the mission is collected
    pub points: u32,
}

/// Payload for creating a mission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMission {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title is required and must be at most 200 characters"
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub extra_info: Option<String>,
    #[validate(range(max = 1_000_000))]
    pub points: u32,
}

impl NewMission {
    /// Build the stored mission under the given ID.
    pub fn into_mission(self, id: String) -> Mission {
        Mission {
            id,
            title: self.title,
            description: self.description,
            extra_info: self.extra_info,
            points: self.points,
        }
    }
}
