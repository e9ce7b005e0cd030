//! Centroid position solver
//!
//! Derives the observer position as the unweighted centroid of a fixed
//! quorum of beacon fixes. Reported beacon distances are not consulted; the
//! solve uses positions only.

use crate::core::{BeaconEntry, PlanarPosition, SOLVE_QUORUM};
use nalgebra::Vector2;

/// Solver that averages the positions of the first quorum of beacons.
///
/// Selection rule: exactly the first [`SOLVE_QUORUM`] entries in slice
/// order, which for registry snapshots is first-appearance order within the
/// current epoch. Entries beyond the quorum are ignored. The result is
/// deterministic for a fixed input ordering.
#[derive(Debug, Clone)]
pub struct CentroidSolver {
    quorum: usize,
}

impl Default for CentroidSolver {
    fn default() -> Self {
        Self {
            quorum: SOLVE_QUORUM,
        }
    }
}

impl CentroidSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the observer estimate from the given beacon fixes.
    ///
    /// Returns `None` while fewer than the quorum of beacons are known.
    pub fn solve(&self, entries: &[BeaconEntry]) -> Option<PlanarPosition> {
        if entries.len() < self.quorum {
            return None;
        }

        let sum: Vector2<f64> = entries[..self.quorum]
            .iter()
            .map(|entry| entry.position.to_vector())
            .sum();

        Some(PlanarPosition::from_vector(sum / self.quorum as f64))
    }
}
