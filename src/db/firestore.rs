// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts, plus the email uniqueness index)
//! - Missions (catalog)
//! - Score events (append-only log, one document per event)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Mission, ScoreEvent, User};
use firestore::errors::FirestoreError;
use serde::{Deserialize, Serialize};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Entry in the `user_emails` index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailIndexEntry {
    user_id: String,
}

/// Document ID for an email index entry (emails may contain `/`).
fn email_doc_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user.
    ///
    /// The email index entry is created first with create-only semantics,
    /// so a second registration for the same email fails before any user
    /// document is written.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let entry = EmailIndexEntry {
            user_id: user.id.clone(),
        };

        let indexed: Result<EmailIndexEntry, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USER_EMAILS)
            .document_id(email_doc_id(&user.email))
            .object(&entry)
            .execute()
            .await;

        match indexed {
            Ok(_) => {}
            Err(FirestoreError::DataConflictError(_)) => return Err(AppError::EmailTaken),
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        let created: Result<User, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await;

        if let Err(e) = created {
            // Release the email so the user can retry
            if let Err(cleanup) = self
                .client
                .fluent()
                .delete()
                .from(collections::USER_EMAILS)
                .document_id(email_doc_id(&user.email))
                .execute()
                .await
            {
                tracing::warn!(error = %cleanup, "Failed to release email index entry");
            }
            return Err(AppError::Database(e.to_string()));
        }

        Ok(())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by normalized email via the email index.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entry: Option<EmailIndexEntry> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::USER_EMAILS)
            .obj()
            .one(&email_doc_id(email))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match entry {
            Some(entry) => self.get_user(&entry.user_id).await,
            None => Ok(None),
        }
    }

    /// Get the user holding an access token.
    pub async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .client
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("accessToken").eq(token)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    // ─── Mission Operations ──────────────────────────────────────

    /// All missions, ordered by title.
    pub async fn list_missions(&self) -> Result<Vec<Mission>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::MISSIONS)
            .order_by([("title", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new mission.
    pub async fn insert_mission(&self, mission: &Mission) -> Result<(), AppError> {
        let _: Mission = self
            .client
            .fluent()
            .insert()
            .into(collections::MISSIONS)
            .document_id(&mission.id)
            .object(mission)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a mission by ID.
    pub async fn get_mission(&self, mission_id: &str) -> Result<Option<Mission>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::MISSIONS)
            .obj()
            .one(mission_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Score Event Operations ──────────────────────────────────

    /// Append a score event as its own document.
    ///
    /// Concurrent appends for the same user touch different documents, so
    /// none of them can be lost.
    pub async fn append_score_event(&self, event: &ScoreEvent) -> Result<(), AppError> {
        let _: ScoreEvent = self
            .client
            .fluent()
            .insert()
            .into(collections::SCORE_EVENTS)
            .document_id(&event.id)
            .object(event)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All score events for a user (unordered).
    pub async fn score_events_for_user(&self, user_id: &str) -> Result<Vec<ScoreEvent>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::SCORE_EVENTS)
            .filter(|q| q.for_all([q.field("userId").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete all score events for a user.
    pub async fn clear_score_events(&self, user_id: &str) -> Result<usize, AppError> {
        let events = self.score_events_for_user(user_id).await?;
        let count = events.len();

        self.batch_delete(&events, collections::SCORE_EVENTS, |event: &ScoreEvent| {
            event.id.clone()
        })
        .await?;

        tracing::debug!(user_id, count, "Deleted score events");
        Ok(count)
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = self
                .client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                self.client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}
