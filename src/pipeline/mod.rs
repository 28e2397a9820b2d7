//! Reconciliation Pipeline Module
//!
//! The backbone of the tool. One run flows strictly left to right:
//!
//! 1. **Fetch**: pull the table's metadata document, snapshot the "before" state
//! 2. **Analyze**: classify columns as documented / undocumented / missing-default
//! 3. **Merge**: substitute caller-supplied overrides for undocumented columns
//! 4. **Update**: push a minimally-scoped column update back to the catalog
//! 5. **Snapshot**: persist the "after" state
//!
//! Only the orchestrator knows the full sequence; each stage stands alone.

pub mod analyzer;
pub mod fetcher;
pub mod merger;
pub mod orchestrator;
pub mod updater;

// Re-export main types for convenient access
pub use analyzer::MissingValueAnalyzer;
pub use fetcher::MetadataFetcher;
pub use merger::OverrideMerger;
pub use orchestrator::{Orchestrator, RunOutcome, RunState};
pub use updater::CatalogUpdater;
