//! Control HTTP Routes
//!
//! Endpoints used by load balancers and the orchestrator:
//! - `GET /.well-known/status` - lightweight health probe
//! - `GET /status` - diagnostic peer and database snapshot
//! - `POST /stop` - graceful stop

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::collaborators::{Heartbeater, Peer, Process};
use crate::health::{self, StatusBody, STATUS_PATH};
use crate::replication::{PeerSnapshot, ProcessSnapshot};
use crate::stop::{StopError, StopSequencer};

// ==================
// Shared State
// ==================

/// Collaborators shared across handlers. Nothing is cached between requests.
pub struct ControlState {
    peer: Arc<dyn Peer>,
    process: Arc<dyn Process>,
    stopper: Arc<StopSequencer>,
}

impl ControlState {
    pub fn new(
        peer: Arc<dyn Peer>,
        process: Arc<dyn Process>,
        heartbeater: Arc<dyn Heartbeater>,
    ) -> Self {
        let stopper = Arc::new(StopSequencer::new(peer.clone(), heartbeater));
        Self {
            peer,
            process,
            stopper,
        }
    }

    /// Stop sequencer shared with exit hooks
    pub fn stopper(&self) -> Arc<StopSequencer> {
        self.stopper.clone()
    }
}

// ==================
// Response Types
// ==================

/// Diagnostic status document. `database` is null when the process could
/// not be queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDocument {
    pub peer: PeerSnapshot,
    pub database: Option<ProcessSnapshot>,
}

// ==================
// Control Routes
// ==================

/// Create control routes
pub fn control_routes(state: Arc<ControlState>) -> Router {
    Router::new()
        .route(STATUS_PATH, get(probe_handler))
        .route("/status", get(status_handler))
        .route("/stop", post(stop_handler))
        .with_state(state)
}

async fn probe_handler(State(state): State<Arc<ControlState>>) -> impl IntoResponse {
    let verdict = health::probe(state.peer.as_ref(), state.process.as_ref()).await;
    (verdict.status_code(), Json(StatusBody::from(verdict)))
}

async fn status_handler(State(state): State<Arc<ControlState>>) -> Json<StatusDocument> {
    let peer = state.peer.info();

    // Peer state is usually available even when the database is down, so
    // a process failure only blanks the database section.
    let database = match state.process.info().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            error!(error = %err, "error getting database process info");
            None
        }
    };

    Json(StatusDocument { peer, database })
}

async fn stop_handler(State(state): State<Arc<ControlState>>) -> Result<StatusCode, StopError> {
    // Detached so a dropped connection cannot abandon the sequence mid-step.
    let stopper = state.stopper();
    tokio::spawn(async move { stopper.stop().await })
        .await
        .map_err(|e| StopError::Interrupted(e.to_string()))??;

    Ok(StatusCode::OK)
}
