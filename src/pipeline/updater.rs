//! Catalog updater
//!
//! Submits the merged column set back to the catalog as a partial update.
//! Only the table name and the columns collection travel; the pipeline
//! does not own the rest of the metadata document and must not resend it.

use crate::catalog::CatalogClient;
use crate::error::ReconcileResult;
use crate::model::{ColumnDescriptor, TableIdentity, TableInput};
use std::sync::Arc;
use tracing::info;

pub struct CatalogUpdater {
    client: Arc<dyn CatalogClient>,
}

impl CatalogUpdater {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Push the full column sequence for one table.
    ///
    /// One atomic call; `Conflict` and `Transient` errors surface to the
    /// orchestrator unmodified.
    pub async fn apply(
        &self,
        identity: &TableIdentity,
        columns: Vec<ColumnDescriptor>,
    ) -> ReconcileResult<()> {
        let column_count = columns.len();
        let input = TableInput {
            name: identity.table.clone(),
            columns,
        };
        self.client.update_table(&identity.database, input).await?;
        info!("Updated {} columns for {}", column_count, identity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocalCatalog;
    use crate::error::ReconcileError;
    use crate::model::TableMetadata;
    use std::fs;

    #[tokio::test]
    async fn apply_sends_only_name_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = TableMetadata {
            name: "orders".to_string(),
            database_name: Some("sales".to_string()),
            location: Some("s3://warehouse/orders/".to_string()),
            create_time: None,
            update_time: None,
            columns: vec![ColumnDescriptor {
                name: "ts".to_string(),
                data_type: "timestamp".to_string(),
                comment: None,
            }],
            attributes: serde_json::Map::new(),
        };
        let path = dir.path().join("catalog.json");
        fs::write(&path, serde_json::to_string(&metadata).unwrap()).unwrap();

        let updater = CatalogUpdater::new(Arc::new(LocalCatalog::new(&path)));
        let identity = TableIdentity {
            database: "sales".to_string(),
            table: "orders".to_string(),
            catalog_id: "123456789012".to_string(),
        };
        updater
            .apply(
                &identity,
                vec![ColumnDescriptor {
                    name: "ts".to_string(),
                    data_type: "timestamp".to_string(),
                    comment: Some("event timestamp".to_string()),
                }],
            )
            .await
            .unwrap();

        // Columns changed, unrelated fields preserved
        let reread: TableMetadata =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread.columns[0].comment.as_deref(), Some("event timestamp"));
        assert_eq!(reread.location.as_deref(), Some("s3://warehouse/orders/"));
    }

    #[tokio::test]
    async fn mismatched_table_name_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = TableMetadata {
            name: "orders".to_string(),
            database_name: Some("sales".to_string()),
            location: None,
            create_time: None,
            update_time: None,
            columns: vec![],
            attributes: serde_json::Map::new(),
        };
        let path = dir.path().join("catalog.json");
        fs::write(&path, serde_json::to_string(&metadata).unwrap()).unwrap();

        let updater = CatalogUpdater::new(Arc::new(LocalCatalog::new(&path)));
        let identity = TableIdentity {
            database: "sales".to_string(),
            table: "customers".to_string(),
            catalog_id: "123456789012".to_string(),
        };
        let err = updater.apply(&identity, vec![]).await.unwrap_err();
        assert!(matches!(err, ReconcileError::Conflict(_)));
    }
}
