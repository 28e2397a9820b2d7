//! Metadata Snapshot Module
//!
//! Durable before/after captures of a table's column documentation.
//! Snapshots are the audit trail for a reconciliation run: what the
//! comments looked like, and which columns were flagged missing.

pub mod writer;

pub use writer::{SnapshotDocument, SnapshotWriter};
