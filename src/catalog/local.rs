//! JSON-file-backed catalog binding
//!
//! Lets the binary and the tests run the full pipeline without a live
//! catalog service. The backing file holds one serialized `TableMetadata`
//! document; updates rewrite the column list in place on disk.

use crate::catalog::{CatalogClient, ObjectStoreClient};
use crate::error::{transient_error, ReconcileError, ReconcileResult};
use crate::model::{TableIdentity, TableInput, TableMetadata};
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Catalog client backed by a single JSON metadata file
pub struct LocalCatalog {
    path: PathBuf,
}

impl LocalCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> ReconcileResult<TableMetadata> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| transient_error(format!("Cannot read catalog file {}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| transient_error(format!("Malformed catalog file {}: {}", self.path.display(), e)))
    }

    fn matches(metadata: &TableMetadata, identity: &TableIdentity) -> bool {
        metadata.name == identity.table
            && metadata
                .database_name
                .as_deref()
                .map(|db| db == identity.database)
                .unwrap_or(true)
    }
}

#[async_trait]
impl CatalogClient for LocalCatalog {
    async fn get_table(&self, identity: &TableIdentity) -> ReconcileResult<TableMetadata> {
        let metadata = self.read_document()?;
        if !Self::matches(&metadata, identity) {
            return Err(ReconcileError::NotFound {
                database: identity.database.clone(),
                table: identity.table.clone(),
            });
        }
        debug!("Fetched metadata for {} ({} columns)", identity, metadata.columns.len());
        Ok(metadata)
    }

    async fn update_table(&self, database: &str, input: TableInput) -> ReconcileResult<()> {
        let mut metadata = self.read_document()?;
        if metadata.name != input.name {
            return Err(ReconcileError::Conflict(format!(
                "Catalog file holds table '{}', update targets '{}'",
                metadata.name, input.name
            )));
        }
        metadata.columns = input.columns;
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| ReconcileError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| transient_error(format!("Cannot write catalog file {}: {}", self.path.display(), e)))?;
        debug!("Updated columns for table '{}' in database '{}'", metadata.name, database);
        Ok(())
    }
}

/// Object store backed by a local directory; objects land at `<root>/<bucket>/<key>`
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStoreClient for LocalObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> ReconcileResult<()> {
        let target = self.root.join(bucket).join(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| transient_error(format!("Cannot create {}: {}", parent.display(), e)))?;
        }
        fs::write(&target, body)
            .map_err(|e| transient_error(format!("Cannot write {}: {}", target.display(), e)))
    }
}
