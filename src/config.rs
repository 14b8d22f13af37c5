// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Where documents are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Google Cloud Firestore in the given project.
    Firestore { project_id: String },
    /// In-process store (local development and tests).
    Memory,
}

impl StorageConfig {
    /// Parse a storage connection string.
    ///
    /// Accepted forms are `firestore://<project-id>` and `memory://`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();

        if let Some(project_id) = url.strip_prefix("firestore://") {
            let project_id = project_id.trim_end_matches('/');
            if project_id.is_empty() || project_id.contains('/') {
                return Err(ConfigError::InvalidStorageUrl(url.to_string()));
            }
            return Ok(StorageConfig::Firestore {
                project_id: project_id.to_string(),
            });
        }

        if url == "memory://" || url == "memory" {
            return Ok(StorageConfig::Memory);
        }

        Err(ConfigError::InvalidStorageUrl(url.to_string()))
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Document store backend
    pub storage: StorageConfig,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE_URL") {
            Ok(url) => StorageConfig::parse(&url)?,
            Err(_) => StorageConfig::Memory,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => {
                let cost: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidBcryptCost(raw.clone()))?;
                if !(4..=31).contains(&cost) {
                    return Err(ConfigError::InvalidBcryptCost(raw));
                }
                cost
            }
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            storage,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            bcrypt_cost,
        })
    }

    /// Config for tests: in-memory storage and the cheapest bcrypt cost.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            storage: StorageConfig::Memory,
            frontend_url: "http://localhost:5173".to_string(),
            bcrypt_cost: 4,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid STORAGE_URL (expected firestore://<project> or memory://): {0}")]
    InvalidStorageUrl(String),

    #[error("Invalid BCRYPT_COST (expected 4..=31): {0}")]
    InvalidBcryptCost(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_firestore_url() {
        let storage = StorageConfig::parse("firestore://my-project").unwrap();
        assert_eq!(
            storage,
            StorageConfig::Firestore {
                project_id: "my-project".to_string()
            }
        );

        // Trailing slash is tolerated
        let storage = StorageConfig::parse("firestore://my-project/").unwrap();
        assert!(matches!(storage, StorageConfig::Firestore { .. }));
    }

    #[test]
    fn test_parse_memory_url() {
        assert_eq!(
            StorageConfig::parse("memory://").unwrap(),
            StorageConfig::Memory
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(StorageConfig::parse("mongodb://localhost/final-project").is_err());
        assert!(StorageConfig::parse("firestore://").is_err());
        assert!(StorageConfig::parse("firestore://a/b").is_err());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("STORAGE_URL", "memory://");
        env::set_var("BCRYPT_COST", "5");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.bcrypt_cost, 5);
        assert_eq!(config.port, 8080);
    }
}
