//! Error types for the exohunt core.
//!
//! Every failure here is local and recoverable: callers either fall back to
//! defaults or surface the message to the user.

/// Result type for core operations.
pub type ExoResult<T> = Result<T, ExoError>;

/// Error type for registry lookups, synthesizers and feature handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExoError {
    /// Requested candidate is not in the registry.
    #[error("Not found: candidate '{id}' is not in the registry")]
    NotFound { id: String },

    /// A parameter failed validation before any computation ran.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl ExoError {
    pub fn not_found(id: impl Into<String>) -> Self {
        ExoError::NotFound { id: id.into() }
    }

    pub fn invalid(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        ExoError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Whether this error denotes an unknown candidate.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExoError::NotFound { .. })
    }
}
