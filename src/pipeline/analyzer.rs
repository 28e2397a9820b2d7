//! Missing-value analyzer
//!
//! Pure classification pass over a metadata document. Never mutates its
//! input, so running it before and after the merge is safe and cheap.

use crate::model::{MissingColumnsReport, MissingStatus, TableMetadata};
use std::collections::HashSet;

/// Classifies columns as documented, undocumented, or missing-default
pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    /// Build the missing-columns report for one metadata document.
    ///
    /// Two independent sources feed the report, and the cross-reference
    /// between them is load-bearing:
    ///
    /// - a column is *undocumented* when its comment is absent or trims
    ///   to empty;
    /// - the *candidate set* is the names of top-level fields in the
    ///   document whose value is JSON null.
    ///
    /// An undocumented column whose name is in the candidate set gets the
    /// `"default comment missing"` tag; every other undocumented column is
    /// reported with the empty tag. Documented columns never appear.
    pub fn analyze(metadata: &TableMetadata) -> MissingColumnsReport {
        let null_fields: HashSet<&str> = metadata
            .attributes
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(name, _)| name.as_str())
            .collect();

        let mut report = MissingColumnsReport::new();
        for column in &metadata.columns {
            if column.is_documented() {
                continue;
            }
            let status = if null_fields.contains(column.name.as_str()) {
                MissingStatus::DefaultCommentMissing
            } else {
                MissingStatus::Undocumented
            };
            report.insert(column.name.clone(), status);
        }
        report
    }
}
