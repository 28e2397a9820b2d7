//! Orchestrator - sequences one reconciliation run
//!
//! The only component that knows the full pipeline order:
//! Fetch -> Analyze -> Merge -> Update -> Snapshot("after"). A failure at
//! any step moves the machine straight to `Failed` and no later step runs.
//! There is no retry; a run either completes or fails outright.

use crate::catalog::{CatalogClient, ObjectStoreClient};
use crate::config::Settings;
use crate::error::ReconcileError;
use crate::model::{MissingColumnsReport, ReconciliationResult, TableIdentity, TableMetadata};
use crate::pipeline::analyzer::MissingValueAnalyzer;
use crate::pipeline::fetcher::MetadataFetcher;
use crate::pipeline::merger::OverrideMerger;
use crate::pipeline::updater::CatalogUpdater;
use crate::snapshot::SnapshotWriter;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

/// States of one reconciliation run, in strict order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Fetched,
    Analyzed,
    Merged,
    Updated,
    SnapshottedAfter,
    Done,
    Failed,
}

/// Pipeline step names, for failure diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum RunStep {
    Fetch,
    Analyze,
    Merge,
    Update,
    Snapshot,
}

impl std::fmt::Display for RunStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStep::Fetch => "fetch",
            RunStep::Analyze => "analyze",
            RunStep::Merge => "merge",
            RunStep::Update => "update",
            RunStep::Snapshot => "snapshot",
        };
        f.write_str(name)
    }
}

/// A failed run: which step, which table, and the underlying cause
#[derive(Error, Debug)]
#[error("Reconciliation failed at step '{step}' for table '{database}.{table}': {source}")]
pub struct RunError {
    pub step: RunStep,
    pub database: String,
    pub table: String,
    #[source]
    pub source: ReconcileError,
}

/// Terminal outcome of a successful run
#[derive(Debug)]
pub enum RunOutcome {
    /// Overrides were merged and the catalog update went through
    Updated(ReconciliationResult),

    /// Every column was already documented; the catalog was never called
    NothingToUpdate {
        metadata: TableMetadata,
        missing_before: MissingColumnsReport,
    },
}

/// Drives one table's reconciliation from fetch to final snapshot
pub struct Orchestrator {
    run_id: Uuid,
    identity: TableIdentity,
    overrides_path: PathBuf,
    after_snapshot: PathBuf,
    fetcher: MetadataFetcher,
    updater: CatalogUpdater,
    state: RunState,

    /// Reserved for future artifact upload; acquired but never invoked
    #[allow(dead_code)]
    object_store: Option<Arc<dyn ObjectStoreClient>>,
}

impl Orchestrator {
    pub fn new(
        settings: &Settings,
        catalog: Arc<dyn CatalogClient>,
        object_store: Option<Arc<dyn ObjectStoreClient>>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            identity: settings.identity.clone(),
            overrides_path: settings.overrides_path.clone(),
            after_snapshot: settings.snapshots.after_path.clone(),
            fetcher: MetadataFetcher::new(catalog.clone(), settings.snapshots.before_path.clone()),
            updater: CatalogUpdater::new(catalog),
            state: RunState::Idle,
            object_store,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the full pipeline for the configured table.
    #[instrument(skip(self), fields(run_id = %self.run_id, table = %self.identity))]
    pub async fn run(&mut self) -> Result<RunOutcome, RunError> {
        info!("Starting reconciliation run");

        let metadata = match self.fetcher.fetch(&self.identity).await {
            Ok(metadata) => metadata,
            Err(e) => return Err(self.fail(RunStep::Fetch, e)),
        };
        self.state = RunState::Fetched;

        let missing_before = MissingValueAnalyzer::analyze(&metadata);
        self.state = RunState::Analyzed;
        info!("{} columns flagged before merge", missing_before.len());

        // Nothing undocumented means nothing to merge and, crucially, no
        // vacuous update call against the catalog.
        if !OverrideMerger::has_undocumented(&metadata) {
            info!("All columns documented, nothing to update");
            self.state = RunState::Done;
            return Ok(RunOutcome::NothingToUpdate {
                metadata,
                missing_before,
            });
        }

        let overrides = match OverrideMerger::load(&self.overrides_path) {
            Ok(overrides) => overrides,
            Err(e) => return Err(self.fail(RunStep::Merge, e)),
        };
        let merged = OverrideMerger::merge(metadata, &overrides);
        self.state = RunState::Merged;

        if let Err(e) = self
            .updater
            .apply(&self.identity, merged.columns.clone())
            .await
        {
            return Err(self.fail(RunStep::Update, e));
        }
        self.state = RunState::Updated;

        let missing_after = MissingValueAnalyzer::analyze(&merged);
        SnapshotWriter::write_best_effort(&merged, &missing_after, &self.after_snapshot);
        self.state = RunState::SnapshottedAfter;

        self.state = RunState::Done;
        info!(
            "Reconciliation complete: {} columns still flagged",
            missing_after.len()
        );
        Ok(RunOutcome::Updated(ReconciliationResult {
            updated_metadata: merged,
            missing_before,
            missing_after,
        }))
    }

    fn fail(&mut self, step: RunStep, source: ReconcileError) -> RunError {
        self.state = RunState::Failed;
        RunError {
            step,
            database: self.identity.database.clone(),
            table: self.identity.table.clone(),
            source,
        }
    }
}
