//! Snapshot writer
//!
//! Serializes a metadata document plus its missing-columns report to a
//! stable JSON shape on disk. Exactly two top-level keys: `default_values`
//! and `missing_columns`. Timestamp fields render as ISO-8601 strings via
//! chrono's RFC 3339 serde support.

use crate::error::{transient_error, ReconcileError, ReconcileResult};
use crate::model::{DefaultValuesSnapshot, MissingColumnsReport, TableMetadata};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk shape of one snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub default_values: DefaultValuesSnapshot,
    pub missing_columns: MissingColumnsReport,
}

/// Writes point-in-time snapshots of a table's column documentation
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Write a snapshot to `destination`, overwriting any existing file.
    pub fn write(
        metadata: &TableMetadata,
        report: &MissingColumnsReport,
        destination: &Path,
    ) -> ReconcileResult<()> {
        let document = SnapshotDocument {
            default_values: Self::default_values(metadata),
            missing_columns: report.clone(),
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| ReconcileError::Serialization(format!("Snapshot not serializable: {}", e)))?;

        fs::write(destination, json).map_err(|e| {
            transient_error(format!("Cannot write snapshot {}: {}", destination.display(), e))
        })?;

        debug!(
            "Wrote snapshot {} ({} columns, {} flagged missing)",
            destination.display(),
            document.default_values.len(),
            document.missing_columns.len()
        );
        Ok(())
    }

    /// Best-effort variant: snapshot failures must never kill the run, so
    /// any error is downgraded to a warning.
    pub fn write_best_effort(
        metadata: &TableMetadata,
        report: &MissingColumnsReport,
        destination: &Path,
    ) {
        if let Err(e) = Self::write(metadata, report, destination) {
            warn!("Snapshot write skipped ({}): {}", destination.display(), e);
        }
    }

    /// Capture every column's current comment, `""` when undocumented.
    pub fn default_values(metadata: &TableMetadata) -> DefaultValuesSnapshot {
        metadata
            .columns
            .iter()
            .map(|col| {
                let comment = if col.is_documented() {
                    col.comment.clone().unwrap_or_default()
                } else {
                    String::new()
                };
                (col.name.clone(), comment)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnDescriptor, MissingStatus};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn metadata_with(columns: Vec<ColumnDescriptor>) -> TableMetadata {
        TableMetadata {
            name: "orders".to_string(),
            database_name: Some("sales".to_string()),
            location: Some("s3://warehouse/orders/".to_string()),
            create_time: Utc.with_ymd_and_hms(2023, 4, 1, 12, 30, 0).single(),
            update_time: None,
            columns,
            attributes: serde_json::Map::new(),
        }
    }

    fn column(name: &str, comment: Option<&str>) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            data_type: "string".to_string(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn default_values_blank_out_undocumented_comments() {
        let metadata = metadata_with(vec![
            column("id", Some("primary key")),
            column("ts", Some("   ")),
            column("payload", None),
        ]);
        let values = SnapshotWriter::default_values(&metadata);
        assert_eq!(values["id"], "primary key");
        assert_eq!(values["ts"], "");
        assert_eq!(values["payload"], "");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default_metadata.json");

        let metadata = metadata_with(vec![
            column("id", Some("primary key")),
            column("ts", None),
        ]);
        let mut report = BTreeMap::new();
        report.insert("ts".to_string(), MissingStatus::DefaultCommentMissing);

        SnapshotWriter::write(&metadata, &report, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let reread: SnapshotDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(reread.default_values, SnapshotWriter::default_values(&metadata));
        assert_eq!(reread.missing_columns, report);

        // Only the two agreed-upon top-level keys
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["default_values", "missing_columns"]);
    }

    #[test]
    fn timestamps_serialize_as_iso_8601() {
        let metadata = metadata_with(vec![]);
        let json = serde_json::to_value(&metadata).unwrap();
        let rendered = json["createTime"].as_str().unwrap();
        assert_eq!(rendered, "2023-04-01T12:30:00Z");
    }

    #[test]
    fn write_overwrites_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(&path, "stale").unwrap();

        let metadata = metadata_with(vec![column("id", Some("pk"))]);
        SnapshotWriter::write(&metadata, &BTreeMap::new(), &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("default_values"));
        assert!(!raw.contains("stale"));
    }

    #[test]
    fn best_effort_write_swallows_io_failure() {
        let metadata = metadata_with(vec![]);
        let path = Path::new("/nonexistent-dir/snap.json");
        // Must not panic or propagate
        SnapshotWriter::write_best_effort(&metadata, &BTreeMap::new(), path);
        assert!(!path.exists());
    }
}
