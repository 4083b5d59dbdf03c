//! Health Predicate
//!
//! A node may receive traffic only when the cluster and the local database
//! process report mutually consistent, stable, write-capable state:
//! - The cluster has converged and no cluster operation is being retried
//! - The node holds a serving role (primary, sync or async)
//! - The database process is running and its account is provisioned
//! - A primary accepts writes and, outside singleton mode, streams
//!   synchronously to the replica the cluster elected
//!
//! Peer checks are in-memory; process checks require a round trip to the
//! database, so callers should only fetch the process snapshot once
//! [`check_peer`] has passed.

use crate::replication::{PeerSnapshot, ProcessSnapshot, ReplicationState};

use super::verdict::HealthVerdict;

/// Why a node is not safe to receive traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnhealthyReason {
    /// Cluster has not converged on a topology
    NoState,

    /// Peer is retrying a cluster operation
    RetryPending,

    /// No replication role assigned
    NoRole,

    /// Process snapshot could not be fetched
    ProcessUnavailable,

    /// Database process is not running
    NotRunning,

    /// Database account is not provisioned
    UserMissing,

    /// Primary rejects writes
    ReadOnlyPrimary,

    /// Primary is not streaming to the elected sync peer
    SyncMismatch {
        expected: Option<String>,
        observed: Option<String>,
    },
}

impl UnhealthyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoState => "no_state",
            Self::RetryPending => "retry_pending",
            Self::NoRole => "no_role",
            Self::ProcessUnavailable => "process_unavailable",
            Self::NotRunning => "not_running",
            Self::UserMissing => "user_missing",
            Self::ReadOnlyPrimary => "read_only_primary",
            Self::SyncMismatch { .. } => "sync_mismatch",
        }
    }
}

impl std::fmt::Display for UnhealthyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cluster-level preconditions. Returns the converged state on success.
pub fn check_peer(peer: &PeerSnapshot) -> Result<&ReplicationState, UnhealthyReason> {
    let state = peer.state.as_ref().ok_or(UnhealthyReason::NoState)?;
    if peer.retry_pending.is_some() {
        return Err(UnhealthyReason::RetryPending);
    }
    if !peer.role.is_assigned() {
        return Err(UnhealthyReason::NoRole);
    }
    Ok(state)
}

/// Process-level checks for a peer that already passed [`check_peer`].
pub fn check_process(
    peer: &PeerSnapshot,
    state: &ReplicationState,
    process: &ProcessSnapshot,
) -> Result<(), UnhealthyReason> {
    if !process.running {
        return Err(UnhealthyReason::NotRunning);
    }
    if !process.user_exists {
        return Err(UnhealthyReason::UserMissing);
    }
    if !peer.role.is_primary() {
        return Ok(());
    }

    if !process.read_write {
        return Err(UnhealthyReason::ReadOnlyPrimary);
    }
    if state.singleton {
        return Ok(());
    }

    match (&state.sync_peer_id, &process.synced_downstream_id) {
        (Some(expected), Some(observed)) if expected == observed => Ok(()),
        (expected, observed) => Err(UnhealthyReason::SyncMismatch {
            expected: expected.clone(),
            observed: observed.clone(),
        }),
    }
}

/// Full predicate over both snapshots.
pub fn assess(peer: &PeerSnapshot, process: &ProcessSnapshot) -> Result<(), UnhealthyReason> {
    let state = check_peer(peer)?;
    check_process(peer, state, process)
}

/// Combine a peer and process snapshot into a verdict.
pub fn evaluate(peer: &PeerSnapshot, process: &ProcessSnapshot) -> HealthVerdict {
    match assess(peer, process) {
        Ok(()) => HealthVerdict::Healthy,
        Err(_) => HealthVerdict::Unhealthy,
    }
}
