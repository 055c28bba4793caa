//! Unified error handling for the CivicReport engine
//!
//! Every fallible operation in the engine returns [`Result`]. Validation
//! failures are surfaced synchronously and never retried; a missing update
//! target is *not* an error (see [`crate::issues::IssueRepository::update`]).

use thiserror::Error;

/// The main error type for the CivicReport engine
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CivicReportError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A submitted record failed validation (empty required field,
    /// unknown category, empty comment text)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A freshly generated issue id collided with a stored one
    #[error("Duplicate issue id: {0}")]
    DuplicateIssueId(String),

    /// The acting user lacks the role required for the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type alias for CivicReport operations
pub type Result<T> = std::result::Result<T, CivicReportError>;
