// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mission Tracker: collect points for everyday missions
//!
//! This crate provides the backend API for registering users, browsing
//! the mission catalog, and tracking the points users collect.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{AccountService, MissionService, ScoreService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub accounts: AccountService,
    pub missions: MissionService,
    pub scores: ScoreService,
}

impl AppState {
    /// Wire every service to the same database handle.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            accounts: AccountService::new(db.clone(), config.bcrypt_cost),
            missions: MissionService::new(db.clone()),
            scores: ScoreService::new(db.clone()),
            config,
            db,
        }
    }
}
