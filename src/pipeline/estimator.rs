//! Estimation pipeline state machine
//!
//! Owns the beacon registry and drives decode → upsert → solve on each
//! inbound frame, publishing an immutable snapshot per accepted observation.
//! The pipeline is driven by transport events (`handle_open`,
//! `handle_frame`, `handle_close`, `handle_error`) and moves through three
//! states:
//!
//! ```text
//! Idle --open--> Streaming --close/error--> Closed (terminal)
//! ```
//!
//! Registry and latest-estimate state sit behind one mutex so two
//! concurrently arriving frames cannot interleave an upsert from one with a
//! solve from the other. Decoding runs before the lock is taken, and
//! publishing hands an owned snapshot to a latest-wins channel, so the only
//! blocking inside the critical section is the work itself.

use crate::algorithms::CentroidSolver;
use crate::core::Snapshot;
use crate::processing::{BeaconRegistry, FrameDecoder};
use crate::transport::TransportError;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Lifecycle state of one pipeline instance.
///
/// `Closed` is terminal: a reconnecting transport starts a fresh pipeline
/// rather than reviving this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No connection yet, frames are not accepted
    Idle,
    /// Actively processing inbound frames
    Streaming,
    /// Stream ended, no further snapshots will be published
    Closed,
}

/// Shared mutable state guarded by the pipeline mutex
struct PipelineInner {
    state: PipelineState,
    registry: BeaconRegistry,
    sequence: u64,
}

/// Position-estimation pipeline for one beacon stream.
///
/// Subscribers receive [`Snapshot`]s through a watch channel: only the
/// latest snapshot is retained, so a consumer slower than the arrival rate
/// misses superseded state but never delays the network path. Dropping the
/// pipeline closes the channel and releases waiting subscribers.
pub struct EstimationPipeline {
    decoder: FrameDecoder,
    solver: CentroidSolver,
    inner: Mutex<PipelineInner>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl Default for EstimationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationPipeline {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            decoder: FrameDecoder::new(),
            solver: CentroidSolver::new(),
            inner: Mutex::new(PipelineInner {
                state: PipelineState::Idle,
                registry: BeaconRegistry::new(),
                sequence: 0,
            }),
            snapshot_tx,
        }
    }

    /// Subscribe to published snapshots.
    ///
    /// The receiver observes the latest snapshot only; intermediate ones may
    /// be skipped without correctness loss since every snapshot is a
    /// function of current state, not a log.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current lifecycle state
    pub fn state(&self) -> PipelineState {
        self.inner.lock().state
    }

    /// Number of beacons in the current epoch's working set
    pub fn beacon_count(&self) -> usize {
        self.inner.lock().registry.len()
    }

    /// The most recently published snapshot
    pub fn latest_snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Transport established the stream
    pub fn handle_open(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            PipelineState::Idle => {
                inner.state = PipelineState::Streaming;
                info!("Beacon stream open");
            }
            PipelineState::Streaming => {}
            PipelineState::Closed => {
                warn!("Ignoring open event on a closed pipeline");
            }
        }
    }

    /// Process one raw text frame from the transport.
    ///
    /// A malformed frame is logged and dropped without touching the registry
    /// or the published estimate; the pipeline keeps streaming. An accepted
    /// frame publishes exactly one snapshot before the next frame is
    /// processed. On the capacity boundary the snapshot still carries the
    /// full pre-reset working set and its solve; the registry is cleared
    /// only after that snapshot is published.
    pub fn handle_frame(&self, raw: &str) {
        // Pure parse, runs before the lock is taken
        let observation = match self.decoder.decode(raw) {
            Ok(observation) => observation,
            Err(e) => {
                warn!(error = %e, "Dropping malformed frame");
                return;
            }
        };

        match observation.distance {
            Some(distance) => {
                debug!(beacon = %observation.beacon_id, distance, "Beacon reported a range")
            }
            None => debug!(beacon = %observation.beacon_id, "Beacon reported no range"),
        }

        let mut inner = self.inner.lock();
        if inner.state != PipelineState::Streaming {
            warn!(
                state = ?inner.state,
                beacon = %observation.beacon_id,
                "Dropping frame outside the streaming state"
            );
            return;
        }

        let size = inner
            .registry
            .upsert(&observation.beacon_id, observation.position);
        debug!(beacon = %observation.beacon_id, size, "Updated beacon fix");

        let beacons = inner.registry.snapshot_entries();
        let estimate = self.solver.solve(&beacons);
        inner.sequence += 1;

        let snapshot = Snapshot {
            beacons,
            estimate,
            epoch: inner.registry.epoch(),
            sequence: inner.sequence,
        };
        // send_replace never blocks: the channel keeps only the newest value
        self.snapshot_tx.send_replace(snapshot);

        // The epoch ends only after the snapshot carrying its final solve
        // has been published
        if inner.registry.is_at_capacity() {
            inner.registry.clear();
            info!(
                epoch = inner.registry.epoch(),
                "Working set reached capacity, starting a new epoch"
            );
        }
    }

    /// Transport ended the stream normally
    pub fn handle_close(&self) {
        let mut inner = self.inner.lock();
        if inner.state != PipelineState::Closed {
            inner.state = PipelineState::Closed;
            info!("Beacon stream closed");
        }
    }

    /// Transport failed; terminal like a close, but logged as an error
    pub fn handle_error(&self, error: &TransportError) {
        let mut inner = self.inner.lock();
        if inner.state != PipelineState::Closed {
            inner.state = PipelineState::Closed;
            error!(%error, "Beacon stream failed");
        }
    }
}
