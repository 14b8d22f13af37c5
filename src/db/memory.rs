//! In-process document store.
//!
//! Mirrors the Firestore collections with `DashMap`s so the service can run
//! without GCP credentials. Contents are lost when the process exits.

use crate::error::AppError;
use crate::models::{Mission, ScoreEvent, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-memory collections keyed the same way as the Firestore documents.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    /// Normalized email -> user ID
    emails: DashMap<String, String>,
    /// Access token -> user ID
    tokens: DashMap<String, String>,
    missions: DashMap<String, Mission>,
    /// User ID -> events in insertion order
    score_events: DashMap<String, Vec<ScoreEvent>>,
}

impl MemoryStore {
    pub fn insert_user(&self, user: &User) -> Result<(), AppError> {
        // The entry guard is held until the user is fully inserted, so a
        // concurrent registration for the same email sees Occupied.
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::EmailTaken),
            Entry::Vacant(slot) => {
                self.users.insert(user.id.clone(), user.clone());
                self.tokens
                    .insert(user.access_token.clone(), user.id.clone());
                slot.insert(user.id.clone());
                Ok(())
            }
        }
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.clone())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let user_id = self.emails.get(email)?.clone();
        self.get_user(&user_id)
    }

    pub fn find_user_by_token(&self, token: &str) -> Option<User> {
        let user_id = self.tokens.get(token)?.clone();
        self.get_user(&user_id)
    }

    pub fn list_missions(&self) -> Vec<Mission> {
        let mut missions: Vec<Mission> = self.missions.iter().map(|m| m.clone()).collect();
        missions.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        missions
    }

    pub fn insert_mission(&self, mission: &Mission) {
        self.missions.insert(mission.id.clone(), mission.clone());
    }

    pub fn get_mission(&self, mission_id: &str) -> Option<Mission> {
        self.missions.get(mission_id).map(|m| m.clone())
    }

    pub fn append_score_event(&self, event: &ScoreEvent) {
        self.score_events
            .entry(event.user_id.clone())
            .or_default()
            .push(event.clone());
    }

    pub fn score_events_for_user(&self, user_id: &str) -> Vec<ScoreEvent> {
        self.score_events
            .get(user_id)
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear_score_events(&self, user_id: &str) -> usize {
        self.score_events
            .remove(user_id)
            .map(|(_, events)| events.len())
            .unwrap_or(0)
    }
}
