//! Replication Role and Cluster State
//!
//! A node's role is assigned by the cluster protocol, never chosen locally.
//! The replication state only exists once the cluster has converged on a
//! stable topology; while a transition is underway it is absent.

use serde::{Deserialize, Serialize};

/// Replication role assigned to this node by the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicationRole {
    /// No role assigned yet
    #[default]
    None,

    /// Accepts writes
    Primary,

    /// Designated synchronous replication target
    Sync,

    /// Asynchronous replica
    Async,
}

impl ReplicationRole {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Primary => "primary",
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }

    /// Whether the cluster has given this node a serving role.
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Primary | Self::Sync | Self::Async)
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl std::fmt::Display for ReplicationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converged replication topology as published by the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationState {
    /// Single-node cluster; synchronous replica matching does not apply
    pub singleton: bool,

    /// Peer elected as the synchronous replica, if any
    pub sync_peer_id: Option<String>,
}

impl ReplicationState {
    /// State for a single-node cluster.
    pub fn singleton() -> Self {
        Self {
            singleton: true,
            sync_peer_id: None,
        }
    }

    /// State for a replicated cluster with the given synchronous peer.
    pub fn with_sync_peer(sync_peer_id: impl Into<String>) -> Self {
        Self {
            singleton: false,
            sync_peer_id: Some(sync_peer_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_roles() {
        assert!(!ReplicationRole::None.is_assigned());
        assert!(ReplicationRole::Primary.is_assigned());
        assert!(ReplicationRole::Sync.is_assigned());
        assert!(ReplicationRole::Async.is_assigned());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ReplicationRole::Async).unwrap();
        assert_eq!(json, "\"async\"");

        let role: ReplicationRole = serde_json::from_str("\"primary\"").unwrap();
        assert_eq!(role, ReplicationRole::Primary);
    }

    #[test]
    fn test_singleton_has_no_sync_peer() {
        let state = ReplicationState::singleton();
        assert!(state.singleton);
        assert!(state.sync_peer_id.is_none());
    }
}
