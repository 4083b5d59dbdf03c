//! Health Probe
//!
//! Sequences the two snapshot fetches around the predicate. The process is
//! only queried once the peer-level checks pass, and a failed process
//! query is logged and counted as unhealthy rather than surfaced.

use tracing::{debug, warn};

use crate::collaborators::{Peer, Process};

use super::evaluator::{check_peer, check_process, UnhealthyReason};
use super::verdict::HealthVerdict;

/// Compute the verdict, returning the reason when unhealthy.
pub async fn diagnose(peer: &dyn Peer, process: &dyn Process) -> Result<(), UnhealthyReason> {
    let info = peer.info();
    let state = check_peer(&info)?;

    let snapshot = match process.info().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(error = %err, "error getting database process info");
            return Err(UnhealthyReason::ProcessUnavailable);
        }
    };

    check_process(&info, state, &snapshot)
}

/// Compute the verdict for the lightweight probe.
pub async fn probe(peer: &dyn Peer, process: &dyn Process) -> HealthVerdict {
    match diagnose(peer, process).await {
        Ok(()) => HealthVerdict::Healthy,
        Err(reason) => {
            debug!(%reason, "node is unhealthy");
            HealthVerdict::Unhealthy
        }
    }
}
