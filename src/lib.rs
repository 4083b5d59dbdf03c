//! appliance-sidecar - health arbitration and control API for a replicated
//! database appliance
//!
//! Decides from locally observable cluster and process state whether this
//! node is safe to receive traffic, and exposes status introspection and a
//! graceful stop to the orchestrator.

pub mod cli;
pub mod client;
pub mod collaborators;
pub mod health;
pub mod http_server;
pub mod logging;
pub mod replication;
pub mod shutdown;
pub mod stop;
