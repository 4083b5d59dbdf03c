//! Graceful Stop Sequence
//!
//! Two ordered steps, first failure short-circuits:
//! 1. Step down from the cluster (peer leaves membership)
//! 2. Deregister from service discovery
//!
//! Discovery is only left after the cluster, so an orchestrator never routes
//! new connections to a node that is about to abandon its role. There is no
//! rollback of step 1 when step 2 fails.
//!
//! The sequence runs at most once at a time. A stop arriving while another
//! is in flight is rejected; after a deregistration failure a later stop
//! only retries deregistration; once fully stopped, further stops succeed
//! without touching any collaborator.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::collaborators::{Heartbeater, Peer};

use super::errors::{StopError, StopResult};

/// Progress of the stop sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPhase {
    /// Member of the cluster and registered for discovery
    Serving,
    /// Step 1 in flight
    SteppingDown,
    /// Left the cluster, still registered for discovery
    SteppedDown,
    /// Step 2 in flight
    Deregistering,
    /// Left the cluster and deregistered
    Stopped,
}

impl StopPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::SteppingDown | Self::Deregistering)
    }
}

/// Drives the peer and the heartbeat handle through the stop sequence.
pub struct StopSequencer {
    peer: Arc<dyn Peer>,
    heartbeater: Arc<dyn Heartbeater>,
    phase: Mutex<StopPhase>,
}

impl StopSequencer {
    pub fn new(peer: Arc<dyn Peer>, heartbeater: Arc<dyn Heartbeater>) -> Self {
        Self {
            peer,
            heartbeater,
            phase: Mutex::new(StopPhase::Serving),
        }
    }

    /// Current phase
    pub fn phase(&self) -> StopPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the sequence. Returns the phase to resume from, or `None` when
    /// there is nothing left to do.
    fn begin(&self) -> StopResult<Option<StopPhase>> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            StopPhase::Serving => {
                *phase = StopPhase::SteppingDown;
                Ok(Some(StopPhase::Serving))
            }
            StopPhase::SteppedDown => {
                *phase = StopPhase::Deregistering;
                Ok(Some(StopPhase::SteppedDown))
            }
            StopPhase::SteppingDown | StopPhase::Deregistering => Err(StopError::InProgress),
            StopPhase::Stopped => Ok(None),
        }
    }

    /// Run the stop sequence.
    pub async fn stop(&self) -> StopResult<()> {
        let from = match self.begin() {
            Ok(Some(from)) => from,
            Ok(None) => {
                info!("stop requested but node is already stopped");
                return Ok(());
            }
            Err(err) => {
                warn!("stop requested while another stop is in progress");
                return Err(err);
            }
        };

        let mut in_flight = InFlight::new(&self.phase, from);

        if from == StopPhase::Serving {
            info!("stepping down from cluster");
            if let Err(err) = self.peer.stop().await {
                error!(error = %err, "error stepping down from cluster");
                in_flight.finish(StopPhase::Serving);
                return Err(StopError::StepDown(err));
            }
            in_flight.advance(StopPhase::Deregistering, StopPhase::SteppedDown);
        } else {
            info!("retrying discovery deregistration");
        }

        info!("deregistering from service discovery");
        if let Err(err) = self.heartbeater.close().await {
            error!(error = %err, "error deregistering from service discovery");
            in_flight.finish(StopPhase::SteppedDown);
            return Err(StopError::Deregister(err));
        }

        in_flight.finish(StopPhase::Stopped);
        info!("node stopped");
        Ok(())
    }
}

/// Holds the in-flight phase for the duration of a step. If the stop future
/// is dropped or a collaborator panics before the step completes, the phase
/// falls back to where the step started so a later stop can run it again.
struct InFlight<'a> {
    phase: &'a Mutex<StopPhase>,
    rollback: StopPhase,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(phase: &'a Mutex<StopPhase>, rollback: StopPhase) -> Self {
        Self {
            phase,
            rollback,
            armed: true,
        }
    }

    fn set(&self, next: StopPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Move on to the next in-flight step.
    fn advance(&mut self, next: StopPhase, rollback: StopPhase) {
        self.set(next);
        self.rollback = rollback;
    }

    /// Record the settled phase and disarm.
    fn finish(mut self, settled: StopPhase) {
        self.set(settled);
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(phase = ?self.rollback, "stop interrupted, rolling back phase");
            self.set(self.rollback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{CollaboratorError, CollaboratorResult};
    use crate::replication::PeerSnapshot;
    use async_trait::async_trait;

    struct NoopPeer;

    #[async_trait]
    impl Peer for NoopPeer {
        fn info(&self) -> PeerSnapshot {
            PeerSnapshot::default()
        }

        async fn stop(&self) -> CollaboratorResult<()> {
            Ok(())
        }
    }

    struct FailingHeartbeater;

    #[async_trait]
    impl Heartbeater for FailingHeartbeater {
        async fn close(&self) -> CollaboratorResult<()> {
            Err(CollaboratorError::new("discovery unavailable"))
        }
    }

    #[test]
    fn test_new_sequencer_is_serving() {
        let seq = StopSequencer::new(Arc::new(NoopPeer), Arc::new(FailingHeartbeater));
        assert_eq!(seq.phase(), StopPhase::Serving);
    }

    #[test]
    fn test_begin_rejects_in_flight() {
        let seq = StopSequencer::new(Arc::new(NoopPeer), Arc::new(FailingHeartbeater));
        assert_eq!(seq.begin().unwrap(), Some(StopPhase::Serving));
        assert!(seq.phase().is_in_flight());
        assert!(matches!(seq.begin(), Err(StopError::InProgress)));
    }

    #[tokio::test]
    async fn test_deregister_failure_leaves_stepped_down() {
        let seq = StopSequencer::new(Arc::new(NoopPeer), Arc::new(FailingHeartbeater));
        let err = seq.stop().await.unwrap_err();
        assert!(matches!(err, StopError::Deregister(_)));
        assert_eq!(seq.phase(), StopPhase::SteppedDown);
    }
}
