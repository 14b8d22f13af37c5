// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and login.
//!
//! Passwords are hashed with bcrypt (random per-user salt) on the blocking
//! thread pool. Each account gets a static access token at registration
//! that is returned again on every successful login.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::user::normalize_email;
use crate::models::User;
use ring::rand::{SecureRandom, SystemRandom};
use serde::Deserialize;
use validator::Validate;

/// Random bytes per access token (hex encoded to twice as many chars).
const ACCESS_TOKEN_BYTES: usize = 128;

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name is required and must be at most 100 characters"
    ))]
    pub first_name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name is required and must be at most 100 characters"
    ))]
    pub last_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 30,
        message = "Password needs to be minimum 8 characters and maximum 30 characters"
    ))]
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Generate an opaque, unguessable access token.
pub fn generate_access_token(rng: &SystemRandom) -> Result<String> {
    let mut bytes = [0u8; ACCESS_TOKEN_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}

/// Registers users and checks their credentials.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
    bcrypt_cost: u32,
    rng: SystemRandom,
}

impl AccountService {
    pub fn new(db: Database, bcrypt_cost: u32) -> Self {
        Self {
            db,
            bcrypt_cost,
            rng: SystemRandom::new(),
        }
    }

    /// Create a new account.
    ///
    /// Validation failures return before anything is hashed or stored.
    pub async fn register(&self, mut request: RegisterRequest) -> Result<User> {
        request.email = normalize_email(&request.email);
        request.first_name = request.first_name.trim().to_string();
        request.last_name = request.last_name.trim().to_string();
        request.validate()?;

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;

        let user = User {
            id: uuid::Uuid::new_v4().simple().to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            access_token: generate_access_token(&self.rng)?,
            created_at: chrono::Utc::now(),
        };

        match self.db.insert_user(&user).await {
            Ok(()) => {}
            Err(AppError::EmailTaken) => {
                tracing::info!("Registration rejected: email already registered");
                return Err(AppError::EmailTaken);
            }
            Err(e) => return Err(e),
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<User> {
        let email = normalize_email(&request.email);

        let Some(user) = self.db.find_user_by_email(&email).await? else {
            tracing::debug!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.into()))
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AccountService {
        AccountService::new(Database::in_memory(), 4)
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_access_token_shape() {
        let rng = SystemRandom::new();
        let a = generate_access_token(&rng).unwrap();
        let b = generate_access_token(&rng).unwrap();

        assert_eq!(a.len(), ACCESS_TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_password_length_is_counted_in_chars() {
        // 8 multi-byte chars: valid even though it is 16 bytes
        assert!(register_request("a@b.com", "ääääääää").validate().is_ok());
        assert!(register_request("a@b.com", "short").validate().is_err());
        assert!(register_request("a@b.com", &"x".repeat(31))
            .validate()
            .is_err());
        assert!(register_request("a@b.com", &"x".repeat(30))
            .validate()
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let accounts = service();
        let user = accounts
            .register(register_request("a@b.com", "longenough"))
            .await
            .unwrap();

        assert_ne!(user.password_hash, "longenough");
        assert!(bcrypt::verify("longenough", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let accounts = service();
        accounts
            .register(register_request(" Mixed@Case.com ", "longenough"))
            .await
            .unwrap();

        let err = accounts
            .register(register_request("mixed@case.com", "longenough"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));

        let user = accounts
            .login(LoginRequest {
                email: "MIXED@case.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "mixed@case.com");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_names() {
        let accounts = service();
        let request = RegisterRequest {
            first_name: "  ".to_string(),
            last_name: " ".to_string(),
            ..register_request("blank@b.com", "longenough")
        };

        let err = accounts.register(request).await.unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert!(errors.field_errors().contains_key("first_name"));
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[tokio::test]
    async fn test_register_trims_names() {
        let accounts = service();
        let request = RegisterRequest {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace  ".to_string(),
            ..register_request("ada@b.com", "longenough")
        };

        let user = accounts.register(request).await.unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
    }

    #[tokio::test]
    async fn test_login_returns_existing_token() {
        let accounts = service();
        let registered = accounts
            .register(register_request("a@b.com", "longenough"))
            .await
            .unwrap();

        let logged_in = accounts
            .login(LoginRequest {
                email: "a@b.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.id, registered.id);
        assert_eq!(logged_in.access_token, registered.access_token);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let accounts = service();
        accounts
            .register(register_request("a@b.com", "longenough"))
            .await
            .unwrap();

        let wrong_password = accounts
            .login(LoginRequest {
                email: "a@b.com".to_string(),
                password: "wrongpassword".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = accounts
            .login(LoginRequest {
                email: "nobody@b.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_database_error() {
        let accounts = AccountService::new(Database::new_mock(), 4);
        let err = accounts
            .login(LoginRequest {
                email: "a@b.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
