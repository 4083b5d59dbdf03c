//! Client Errors

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Sidecar client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Sidecar answered with an error response
    #[error("sidecar returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status returned by the sidecar, if it answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
