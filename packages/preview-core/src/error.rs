//! Typed errors for the preview core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur in store, driver, and client operations.
///
/// The classifier and validator never produce errors; they are total
/// functions returning structured results.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Referenced template id absent from the store
    #[error("template not found: {id}")]
    TemplateNotFound { id: String },

    /// Referenced result id absent from the store
    #[error("result not found: {id}")]
    ResultNotFound { id: String },

    /// File record failed validation
    #[error("validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// Durable-storage read or write failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Remote AI call returned a non-success response
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for preview-core operations.
pub type Result<T> = std::result::Result<T, PreviewError>;
