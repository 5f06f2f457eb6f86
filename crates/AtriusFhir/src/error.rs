//! Error types for parsing, validating and writing model instances.

use atrius_model_support::ValidationError;
use thiserror::Error;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A constraint was violated while building an instance
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed or non-conformant FHIR JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `resourceType` names a resource this model does not carry
    #[error("unsupported resource type '{0}'")]
    UnknownResourceType(String),
}
