// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod mission;
pub mod score;
pub mod user;

pub use mission::{Mission, NewMission};
pub use score::{DailyScore, ScoreEvent};
pub use user::{User, UserProfile};
