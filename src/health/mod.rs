//! Health Arbitration
//!
//! Decides whether this node is safe to receive traffic:
//! - [`evaluate`] is the pure predicate over a peer and process snapshot
//! - [`probe`] fetches the snapshots in order and applies the predicate
//! - [`HealthVerdict`] and [`StatusBody`] form the shared probe protocol

mod evaluator;
mod probe;
mod verdict;

pub use evaluator::{assess, check_peer, check_process, evaluate, UnhealthyReason};
pub use probe::{diagnose, probe};
pub use verdict::{HealthVerdict, StatusBody, StatusData, STATUS_PATH};
