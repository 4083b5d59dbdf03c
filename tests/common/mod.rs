//! Test collaborators
//!
//! In-memory stand-ins for the peer, the database process and the
//! discovery heartbeater, with call counters and scripted failures.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use appliance_sidecar::collaborators::{
    CollaboratorError, CollaboratorResult, Heartbeater, Peer, Process,
};
use appliance_sidecar::http_server::ControlState;
use appliance_sidecar::replication::{
    PeerSnapshot, ProcessSnapshot, ReplicationRole, ReplicationState,
};
use async_trait::async_trait;
use tokio::sync::Notify;

/// Peer whose snapshot and stop outcome are set by the test.
/// A successful stop clears the role and state, as stepping down does.
#[derive(Default)]
pub struct FakePeer {
    snapshot: Mutex<PeerSnapshot>,
    stop_error: Mutex<Option<String>>,
    stop_gate: Mutex<Option<Arc<Notify>>>,
    stop_calls: AtomicUsize,
}

impl FakePeer {
    pub fn new(snapshot: PeerSnapshot) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(snapshot),
            ..Default::default()
        })
    }

    pub fn fail_stop(&self, message: &str) {
        *self.stop_error.lock().unwrap() = Some(message.to_string());
    }

    /// Make `stop` wait until the returned gate is notified.
    pub fn gate_stop(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.stop_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Peer for FakePeer {
    fn info(&self) -> PeerSnapshot {
        self.snapshot.lock().unwrap().clone()
    }

    async fn stop(&self) -> CollaboratorResult<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.stop_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(message) = self.stop_error.lock().unwrap().clone() {
            return Err(CollaboratorError::new(message));
        }

        *self.snapshot.lock().unwrap() = PeerSnapshot::default();
        Ok(())
    }
}

/// Database process returning a fixed snapshot or error.
pub struct FakeProcess {
    result: Mutex<CollaboratorResult<ProcessSnapshot>>,
    calls: AtomicUsize,
}

impl FakeProcess {
    pub fn new(snapshot: ProcessSnapshot) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(Ok(snapshot)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(Err(CollaboratorError::new(message))),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Process for FakeProcess {
    async fn info(&self) -> CollaboratorResult<ProcessSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

/// Heartbeater counting close calls, optionally failing the first N.
#[derive(Default)]
pub struct FakeHeartbeater {
    failures_left: AtomicUsize,
    close_gate: Mutex<Option<Arc<Notify>>>,
    close_calls: AtomicUsize,
}

impl FakeHeartbeater {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(times: usize) -> Arc<Self> {
        Arc::new(Self {
            failures_left: AtomicUsize::new(times),
            ..Default::default()
        })
    }

    /// Make `close` wait until the returned gate is notified.
    pub fn gate_close(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.close_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Heartbeater for FakeHeartbeater {
    async fn close(&self) -> CollaboratorResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.close_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            Err(CollaboratorError::new("discovery lease not found"))
        } else {
            Ok(())
        }
    }
}

/// Primary of a replicated cluster whose elected sync peer is `replica-2`.
pub fn replicated_primary() -> PeerSnapshot {
    PeerSnapshot::converged(
        ReplicationRole::Primary,
        ReplicationState::with_sync_peer("replica-2"),
    )
}

/// Fully healthy primary process streaming to `downstream`.
pub fn primary_process(downstream: &str) -> ProcessSnapshot {
    ProcessSnapshot::running(true).with_downstream(downstream)
}

pub fn control_state(
    peer: Arc<FakePeer>,
    process: Arc<FakeProcess>,
    heartbeater: Arc<FakeHeartbeater>,
) -> Arc<ControlState> {
    Arc::new(ControlState::new(peer, process, heartbeater))
}
