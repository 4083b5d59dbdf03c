//! # Stop Errors
//!
//! Errors reported by the graceful stop sequence. Collaborator failures are
//! surfaced with their original message; the failing step is reported
//! alongside it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::collaborators::CollaboratorError;

/// Result type for stop operations
pub type StopResult<T> = Result<T, StopError>;

/// Stop sequence step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStep {
    /// Leaving cluster membership
    StepDown,
    /// Deregistering from service discovery
    Deregister,
}

/// Stop sequence errors
#[derive(Debug, Clone, Error)]
pub enum StopError {
    /// Another stop is already running
    #[error("stop already in progress")]
    InProgress,

    /// Peer refused or failed to leave the cluster; nothing was changed
    #[error("{0}")]
    StepDown(#[source] CollaboratorError),

    /// Left the cluster but discovery deregistration failed
    #[error("{0}")]
    Deregister(#[source] CollaboratorError),

    /// The stop task terminated before reporting a result
    #[error("stop task failed: {0}")]
    Interrupted(String),
}

impl StopError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StopError::InProgress => StatusCode::CONFLICT,
            StopError::StepDown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StopError::Deregister(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StopError::Interrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The step that failed, if a collaborator reported the failure
    pub fn step(&self) -> Option<StopStep> {
        match self {
            StopError::StepDown(_) => Some(StopStep::StepDown),
            StopError::Deregister(_) => Some(StopStep::Deregister),
            StopError::InProgress | StopError::Interrupted(_) => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub step: Option<StopStep>,
}

impl From<StopError> for ErrorResponse {
    fn from(err: StopError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            step: err.step(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for StopError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StopError::InProgress.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            StopError::StepDown(CollaboratorError::new("x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            StopError::Deregister(CollaboratorError::new("x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_collaborator_message_unwrapped() {
        let err = StopError::Deregister(CollaboratorError::new("lease not found"));
        let body = ErrorResponse::from(err);
        assert_eq!(body.error, "lease not found");
        assert_eq!(body.code, 500);
        assert_eq!(body.step, Some(StopStep::Deregister));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["step"], "deregister");
    }
}
