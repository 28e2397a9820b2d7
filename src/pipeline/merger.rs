//! Override merger
//!
//! Loads the external override mapping and substitutes replacement comments
//! for undocumented columns. Returns a fresh metadata value with a new
//! column sequence so the "before" snapshot never aliases the merged result.

use crate::error::{override_error, ReconcileResult};
use crate::model::{ColumnDescriptor, OverrideSet, TableMetadata};
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct OverrideMerger;

impl OverrideMerger {
    /// Load the override set from a flat JSON object file.
    ///
    /// A missing, unreadable, or malformed file is an `OverrideSource`
    /// error; the orchestrator treats that as fatal.
    pub fn load(path: &Path) -> ReconcileResult<OverrideSet> {
        let raw = fs::read_to_string(path).map_err(|e| {
            override_error(format!("Cannot read override file {}: {}", path.display(), e))
        })?;
        let overrides: OverrideSet = serde_json::from_str(&raw).map_err(|e| {
            override_error(format!("Malformed override file {}: {}", path.display(), e))
        })?;
        debug!("Loaded {} override entries from {}", overrides.len(), path.display());
        Ok(overrides)
    }

    /// True when at least one column lacks a usable comment.
    pub fn has_undocumented(metadata: &TableMetadata) -> bool {
        metadata.columns.iter().any(|col| !col.is_documented())
    }

    /// Apply overrides to every undocumented column.
    ///
    /// Documented columns pass through untouched. Undocumented columns take
    /// the override value when one exists for their name, and an explicit
    /// empty comment otherwise.
    pub fn merge(metadata: TableMetadata, overrides: &OverrideSet) -> TableMetadata {
        let columns = metadata
            .columns
            .iter()
            .map(|col| {
                if col.is_documented() {
                    return col.clone();
                }
                let comment = overrides.get(&col.name).cloned().unwrap_or_default();
                ColumnDescriptor {
                    comment: Some(comment),
                    ..col.clone()
                }
            })
            .collect();

        TableMetadata { columns, ..metadata }
    }
}
