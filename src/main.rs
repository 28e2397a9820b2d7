//! CommentSync - Catalog Column-Comment Reconciliation
//!
//! Reconciles column-level documentation for one catalog table against an
//! externally supplied override file, and persists before/after JSON
//! snapshots for auditing.
//!
//! One invocation processes exactly one table:
//! - Fetch: pull the table's metadata document, snapshot the "before" state
//! - Analyze: classify columns as documented / undocumented / missing-default
//! - Merge: substitute override comments for undocumented columns
//! - Update: push a minimally-scoped column update back to the catalog
//! - Snapshot: persist the "after" state

mod catalog;
mod config;
mod error;
mod model;
mod pipeline;
mod snapshot;

use crate::catalog::{CatalogClient, LocalCatalog, LocalObjectStore, ObjectStoreClient};
use crate::config::Settings;
use crate::pipeline::{Orchestrator, RunOutcome};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("Starting CommentSync - catalog comment reconciliation");

    // Load configuration
    let settings = Settings::load()?;
    info!(
        "Reconciling table '{}' (catalog {})",
        settings.identity, settings.identity.catalog_id
    );

    // Wire the collaborator clients. The object store is acquired up front
    // but the pipeline does not upload anything yet.
    let catalog: Arc<dyn CatalogClient> = Arc::new(LocalCatalog::new(&settings.catalog_path));
    let object_store: Option<Arc<dyn ObjectStoreClient>> = settings.artifact_store.as_ref().map(|store| {
        info!("Artifact store configured: {}/{}", store.bucket, store.key);
        Arc::new(LocalObjectStore::new(".")) as Arc<dyn ObjectStoreClient>
    });

    let mut orchestrator = Orchestrator::new(&settings, catalog, object_store);
    match orchestrator.run().await {
        Ok(RunOutcome::Updated(result)) => {
            info!(
                "Done: {} columns updated, {} still flagged missing",
                result.updated_metadata.columns.len(),
                result.missing_after.len()
            );
            Ok(())
        }
        Ok(RunOutcome::NothingToUpdate { metadata, .. }) => {
            info!(
                "Done: all {} columns already documented, nothing to update",
                metadata.columns.len()
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,commentsync=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_level(true).compact())
        .init();
}
