//! Error handling module
//!
//! Typed error taxonomy for the reconciliation pipeline. Expected failures
//! (table absent, catalog conflict, bad override file) are distinct variants
//! so the orchestrator can report which step failed and why; nothing is
//! swallowed into a silent sentinel.

use thiserror::Error;

/// Pipeline-wide error type
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Table '{table}' not found in database '{database}'")]
    NotFound { database: String, table: String },

    #[error("Transient I/O failure: {0}")]
    Transient(String),

    #[error("Catalog rejected the update: {0}")]
    Conflict(String),

    #[error("Override source error: {0}")]
    OverrideSource(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline components
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Helper to create a transient I/O error
pub fn transient_error(msg: impl Into<String>) -> ReconcileError {
    ReconcileError::Transient(msg.into())
}

/// Helper to create an override source error
pub fn override_error(msg: impl Into<String>) -> ReconcileError {
    ReconcileError::OverrideSource(msg.into())
}
