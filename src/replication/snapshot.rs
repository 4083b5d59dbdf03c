//! Peer and Process Snapshots
//!
//! Both snapshots are read fresh on every request. Nothing here is cached
//! or persisted; the owning collaborators are the only writers.

use serde::{Deserialize, Serialize};

use super::role::{ReplicationRole, ReplicationState};

/// Marker set while the peer is retrying a cluster operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPending {
    /// Cluster operation being retried
    pub operation: String,
}

impl RetryPending {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

/// Cluster view reported by the peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSnapshot {
    pub role: ReplicationRole,

    /// Absent until the cluster has converged
    pub state: Option<ReplicationState>,

    /// Present while a cluster operation is being retried
    pub retry_pending: Option<RetryPending>,
}

impl PeerSnapshot {
    /// Snapshot of a node with a role and converged state.
    pub fn converged(role: ReplicationRole, state: ReplicationState) -> Self {
        Self {
            role,
            state: Some(state),
            retry_pending: None,
        }
    }

    /// Whether the peer has settled: converged state and no retry in flight.
    pub fn is_stable(&self) -> bool {
        self.state.is_some() && self.retry_pending.is_none()
    }
}

/// Runtime facts reported by the local database process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub running: bool,

    /// Controlling OS account is provisioned
    pub user_exists: bool,

    pub read_write: bool,

    /// Replica currently receiving synchronous replication from this process
    pub synced_downstream_id: Option<String>,
}

impl ProcessSnapshot {
    /// A live, provisioned process.
    pub fn running(read_write: bool) -> Self {
        Self {
            running: true,
            user_exists: true,
            read_write,
            synced_downstream_id: None,
        }
    }

    /// Sets the observed synchronous downstream.
    pub fn with_downstream(mut self, id: impl Into<String>) -> Self {
        self.synced_downstream_id = Some(id.into());
        self
    }
}
