//! External collaborator seams
//!
//! The reconciliation core only ever talks to the catalog and the object
//! store through these traits. Session establishment, credentials, and
//! connection-level timeout policy all live behind the implementations.

mod local;

pub use local::{LocalCatalog, LocalObjectStore};

use crate::error::ReconcileResult;
use crate::model::{TableIdentity, TableInput, TableMetadata};
use async_trait::async_trait;

/// Read/write access to the table catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full metadata document for one table.
    ///
    /// Fails with `ReconcileError::NotFound` when the table does not exist
    /// in the given database, and `ReconcileError::Transient` on any other
    /// fetch failure.
    async fn get_table(&self, identity: &TableIdentity) -> ReconcileResult<TableMetadata>;

    /// Apply a partial update carrying only the table name and columns.
    ///
    /// Fails with `ReconcileError::Conflict` when the catalog rejects the
    /// update and `ReconcileError::Transient` on network/permission failure.
    async fn update_table(&self, database: &str, input: TableInput) -> ReconcileResult<()>;
}

/// Durable object storage.
///
/// Acquired at startup alongside the catalog client; reserved for future
/// artifact upload and not invoked by the pipeline itself.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> ReconcileResult<()>;
}
