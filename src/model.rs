//! Core data model for one reconciliation run
//!
//! Everything here is created fresh per invocation and discarded when the
//! process exits; the only durable artifacts are the JSON snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Identity of the single table a run operates on.
///
/// All three parts are required; the catalog distinguishes tables by
/// database + name within one catalog container.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TableIdentity {
    #[validate(length(min = 1, message = "Database name is required"))]
    pub database: String,

    #[validate(length(min = 1, message = "Table name is required"))]
    pub table: String,

    #[validate(length(min = 1, message = "Catalog ID is required"))]
    pub catalog_id: String,
}

impl std::fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

/// One column as the catalog describes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub data_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// A column counts as documented only when its comment survives
    /// whitespace trimming. Absent and blank comments are equivalent.
    pub fn is_documented(&self) -> bool {
        self.comment
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Full metadata document for one table, as fetched from the catalog.
///
/// Top-level attributes the pipeline does not model explicitly are kept in
/// `attributes`, including explicit JSON nulls; the missing-value analyzer
/// scans those for its null-field candidate set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,

    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Minimal update payload: table name plus the full column sequence.
///
/// Never the whole metadata document; the pipeline does not own the other
/// fields and must not touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInput {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Status tag attached to an undocumented column in the missing report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MissingStatus {
    /// Undocumented and the table document carries a top-level null field
    /// of the same name
    #[serde(rename = "default comment missing")]
    DefaultCommentMissing,

    /// Undocumented, but not independently flagged by the null-field scan
    #[serde(rename = "")]
    Undocumented,
}

/// Column name -> missing status. BTreeMap keeps snapshot JSON stable
/// across runs, which matters for audit diffs.
pub type MissingColumnsReport = BTreeMap<String, MissingStatus>;

/// Column name -> current comment (`""` when undocumented)
pub type DefaultValuesSnapshot = BTreeMap<String, String>;

/// Column name -> replacement comment, loaded wholesale from the override file
pub type OverrideSet = BTreeMap<String, String>;

/// Terminal artifact of one successful reconciliation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub updated_metadata: TableMetadata,
    pub missing_before: MissingColumnsReport,
    pub missing_after: MissingColumnsReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(name: &str, comment: Option<&str>) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            data_type: "string".to_string(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn blank_and_absent_comments_are_undocumented() {
        assert!(!column("a", None).is_documented());
        assert!(!column("a", Some("")).is_documented());
        assert!(!column("a", Some("   \t")).is_documented());
        assert!(column("a", Some("primary key")).is_documented());
    }

    #[test]
    fn missing_status_serializes_to_legacy_tags() {
        let json = serde_json::to_string(&MissingStatus::DefaultCommentMissing).unwrap();
        assert_eq!(json, "\"default comment missing\"");
        let json = serde_json::to_string(&MissingStatus::Undocumented).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn metadata_retains_top_level_nulls() {
        let raw = r#"{
            "name": "orders",
            "columns": [{"name": "id", "type": "bigint"}],
            "retention": null,
            "owner": "analytics"
        }"#;
        let metadata: TableMetadata = serde_json::from_str(raw).unwrap();
        assert!(metadata.attributes.get("retention").unwrap().is_null());
        assert_eq!(metadata.attributes.get("owner").unwrap(), "analytics");
    }

    #[test]
    fn identity_rejects_empty_parts() {
        let identity = TableIdentity {
            database: "sales".into(),
            table: String::new(),
            catalog_id: "123".into(),
        };
        assert!(identity.validate().is_err());
    }
}
