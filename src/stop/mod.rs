//! Graceful Stop
//!
//! Removes the node from service: first from cluster membership, then from
//! service discovery.

mod errors;
mod sequencer;

pub use errors::{ErrorResponse, StopError, StopResult, StopStep};
pub use sequencer::{StopPhase, StopSequencer};
