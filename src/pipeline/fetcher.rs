//! Metadata fetcher
//!
//! Pulls one table's full metadata document from the catalog and, on
//! success, immediately captures the "before" snapshot. The snapshot is
//! best-effort; a fetch failure propagates typed so the orchestrator can
//! tell "table absent" apart from "catalog unreachable".

use crate::catalog::CatalogClient;
use crate::error::ReconcileResult;
use crate::model::{TableIdentity, TableMetadata};
use crate::pipeline::analyzer::MissingValueAnalyzer;
use crate::snapshot::SnapshotWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct MetadataFetcher {
    client: Arc<dyn CatalogClient>,
    before_snapshot: PathBuf,
}

impl MetadataFetcher {
    pub fn new(client: Arc<dyn CatalogClient>, before_snapshot: PathBuf) -> Self {
        Self {
            client,
            before_snapshot,
        }
    }

    /// Fetch the metadata document and persist the "before" state.
    ///
    /// The snapshot is only attempted after a successful fetch; a failed
    /// fetch leaves no artifacts behind.
    pub async fn fetch(&self, identity: &TableIdentity) -> ReconcileResult<TableMetadata> {
        let metadata = self.client.get_table(identity).await?;
        info!(
            "Fetched metadata for {}: {} columns",
            identity,
            metadata.columns.len()
        );

        let report = MissingValueAnalyzer::analyze(&metadata);
        SnapshotWriter::write_best_effort(&metadata, &report, &self.before_snapshot);

        Ok(metadata)
    }
}
