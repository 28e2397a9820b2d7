//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.
//! All configuration flows through an explicit `Settings` value handed to
//! the orchestrator at construction; there is no process-wide mutable state.

use crate::model::TableIdentity;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Where the durable snapshot files land
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub before_path: PathBuf,
    pub after_path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            before_path: PathBuf::from("default_metadata.json"),
            after_path: PathBuf::from("updated_metadata.json"),
        }
    }
}

/// Optional object-store target for future artifact upload
#[derive(Debug, Clone)]
pub struct ArtifactStoreConfig {
    pub bucket: String,
    pub key: String,
}

/// Complete application settings for one reconciliation run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Identity of the table to reconcile
    pub identity: TableIdentity,

    /// Backing file for the local catalog binding
    pub catalog_path: PathBuf,

    /// External override file (column name -> replacement comment)
    pub overrides_path: PathBuf,

    pub snapshots: SnapshotConfig,

    pub artifact_store: Option<ArtifactStoreConfig>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let identity = TableIdentity {
            database: require_var("CATALOG_DATABASE")?,
            table: require_var("CATALOG_TABLE")?,
            catalog_id: require_var("CATALOG_ID")?,
        };
        identity
            .validate()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let catalog_path = PathBuf::from(require_var("CATALOG_PATH")?);

        let defaults = SnapshotConfig::default();
        let snapshots = SnapshotConfig {
            before_path: std::env::var("BEFORE_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.before_path),
            after_path: std::env::var("AFTER_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.after_path),
        };

        let overrides_path = std::env::var("OVERRIDES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("new_values.json"));

        // Both bucket and key, or neither
        let artifact_store = match (
            std::env::var("ARTIFACT_BUCKET").ok(),
            std::env::var("ARTIFACT_KEY").ok(),
        ) {
            (Some(bucket), Some(key)) => Some(ArtifactStoreConfig { bucket, key }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "ARTIFACT_BUCKET and ARTIFACT_KEY must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            identity,
            catalog_path,
            overrides_path,
            snapshots,
            artifact_store,
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}
