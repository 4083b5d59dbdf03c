//! Replication Topology Model
//!
//! Read-only view of the cluster and of the local database process:
//! - Roles are assigned by the cluster, never inferred locally
//! - Converged state is absent while the topology is changing
//! - Snapshots are taken fresh on every request

mod role;
mod snapshot;

pub use role::{ReplicationRole, ReplicationState};
pub use snapshot::{PeerSnapshot, ProcessSnapshot, RetryPending};
