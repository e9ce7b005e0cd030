//! Core data types for the beacon positioning pipeline

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Planar position, either reported by a beacon or derived for the observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPosition {
    pub x: f64,
    pub y: f64,
}

impl PlanarPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to a nalgebra vector for solver arithmetic
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// One decoded inbound beacon message.
///
/// Immutable once decoded: the pipeline consumes it into the registry and
/// discards it. `distance` is the beacon's reported range to the observer;
/// it is carried for diagnostics but not consulted by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub beacon_id: String,
    pub position: PlanarPosition,
    pub distance: Option<f64>,
}

/// Last-known position for one beacon in the working set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconEntry {
    pub id: String,
    pub position: PlanarPosition,
}

/// Immutable publish unit combining the working set and the estimate at one
/// point in time.
///
/// Ownership transfers to the subscriber on publish; the pipeline never
/// mutates a snapshot it has already handed out. `sequence` counts accepted
/// observations, `epoch` counts capacity-triggered registry resets at the
/// time the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Working-set copy, in first-appearance order within the epoch
    pub beacons: Vec<BeaconEntry>,
    /// Observer position estimate, absent while the quorum is not met
    pub estimate: Option<PlanarPosition>,
    /// Registry epoch the snapshot was taken in
    pub epoch: u64,
    /// Monotonic count of accepted observations
    pub sequence: u64,
}
