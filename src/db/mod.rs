//! Database layer.
//!
//! [`Database`] is the handle services receive. It dispatches to Firestore
//! in production, to an in-process [`MemoryStore`] for local runs and tests,
//! or to an offline stub that fails every call.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::config::StorageConfig;
use crate::error::AppError;
use crate::models::{Mission, ScoreEvent, User};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Email uniqueness index (document ID = normalized email)
    pub const USER_EMAILS: &str = "user_emails";
    pub const MISSIONS: &str = "missions";
    /// Append-only score log, one document per collected mission
    pub const SCORE_EVENTS: &str = "score_events";
}

/// Shared database handle.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
    Offline,
}

fn offline() -> AppError {
    AppError::Database("Database not connected (offline mode)".to_string())
}

impl Database {
    /// Connect to the backend named by the storage config.
    pub async fn connect(storage: &StorageConfig) -> Result<Self, AppError> {
        match storage {
            StorageConfig::Firestore { project_id } => Ok(Self {
                backend: Backend::Firestore(FirestoreStore::new(project_id).await?),
            }),
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Create an empty in-process database.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::default())),
        }
    }

    /// Create a mock database for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Firestore(_) => "firestore",
            Backend::Memory(_) => "memory",
            Backend::Offline => "offline",
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new user, failing with [`AppError::EmailTaken`] if the
    /// email is already registered.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.insert_user(user).await,
            Backend::Memory(mem) => mem.insert_user(user),
            Backend::Offline => Err(offline()),
        }
    }

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.get_user(user_id).await,
            Backend::Memory(mem) => Ok(mem.get_user(user_id)),
            Backend::Offline => Err(offline()),
        }
    }

    /// Get a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.find_user_by_email(email).await,
            Backend::Memory(mem) => Ok(mem.find_user_by_email(email)),
            Backend::Offline => Err(offline()),
        }
    }

    /// Get the user holding an access token.
    pub async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.find_user_by_token(token).await,
            Backend::Memory(mem) => Ok(mem.find_user_by_token(token)),
            Backend::Offline => Err(offline()),
        }
    }

    // ─── Mission Operations ──────────────────────────────────────

    /// All missions, ordered by title.
    pub async fn list_missions(&self) -> Result<Vec<Mission>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.list_missions().await,
            Backend::Memory(mem) => Ok(mem.list_missions()),
            Backend::Offline => Err(offline()),
        }
    }

    /// Store a new mission.
    pub async fn insert_mission(&self, mission: &Mission) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.insert_mission(mission).await,
            Backend::Memory(mem) => {
                mem.insert_mission(mission);
                Ok(())
            }
            Backend::Offline => Err(offline()),
        }
    }

    /// Get a mission by ID.
    pub async fn get_mission(&self, mission_id: &str) -> Result<Option<Mission>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.get_mission(mission_id).await,
            Backend::Memory(mem) => Ok(mem.get_mission(mission_id)),
            Backend::Offline => Err(offline()),
        }
    }

    // ─── Score Event Operations ──────────────────────────────────

    /// Append a score event. Never rewrites existing events.
    pub async fn append_score_event(&self, event: &ScoreEvent) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.append_score_event(event).await,
            Backend::Memory(mem) => {
                mem.append_score_event(event);
                Ok(())
            }
            Backend::Offline => Err(offline()),
        }
    }

    /// All score events for a user, oldest first.
    pub async fn score_events_for_user(&self, user_id: &str) -> Result<Vec<ScoreEvent>, AppError> {
        let mut events = match &self.backend {
            Backend::Firestore(db) => db.score_events_for_user(user_id).await?,
            Backend::Memory(mem) => mem.score_events_for_user(user_id),
            Backend::Offline => return Err(offline()),
        };
        events.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(events)
    }

    /// Delete all score events for a user. Returns how many were removed.
    pub async fn clear_score_events(&self, user_id: &str) -> Result<usize, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.clear_score_events(user_id).await,
            Backend::Memory(mem) => Ok(mem.clear_score_events(user_id)),
            Backend::Offline => Err(offline()),
        }
    }
}
