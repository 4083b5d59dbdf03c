//! Collaborator Error Types

use thiserror::Error;

/// Failure reported by an external collaborator.
///
/// The message is passed through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for CollaboratorError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Result type for collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
