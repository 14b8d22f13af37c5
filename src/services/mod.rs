// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod missions;
pub mod scores;

pub use accounts::{AccountService, LoginRequest, RegisterRequest};
pub use missions::MissionService;
pub use scores::ScoreService;
