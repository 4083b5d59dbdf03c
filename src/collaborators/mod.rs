//! External Collaborators
//!
//! The sidecar never owns cluster or process state. It reads snapshots from
//! and issues commands to three injected components:
//!
//! - [`Peer`]: cluster role and converged replication state, owns step-down
//! - [`Process`]: live facts about the local database process
//! - [`Heartbeater`]: service-discovery registration
//!
//! Implementations must be safe for concurrent use without external locking.

mod errors;

use async_trait::async_trait;

use crate::replication::{PeerSnapshot, ProcessSnapshot};

pub use errors::{CollaboratorError, CollaboratorResult};

/// Cluster membership handle.
#[async_trait]
pub trait Peer: Send + Sync {
    /// Current cluster view. In-memory, no side effects.
    fn info(&self) -> PeerSnapshot;

    /// Relinquish the cluster role and leave membership.
    async fn stop(&self) -> CollaboratorResult<()>;
}

/// Local database process supervisor.
#[async_trait]
pub trait Process: Send + Sync {
    /// Query the live database process.
    async fn info(&self) -> CollaboratorResult<ProcessSnapshot>;
}

/// Service-discovery registration handle.
#[async_trait]
pub trait Heartbeater: Send + Sync {
    /// Deregister from service discovery.
    async fn close(&self) -> CollaboratorResult<()>;
}
