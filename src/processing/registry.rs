//! Bounded working set of last-known beacon positions
//!
//! The registry holds at most one entry per beacon id. Reaching
//! [`REGISTRY_CAPACITY`] distinct beacons ends the current epoch: the whole
//! set is cleared and the next observation starts from scratch. This bounds
//! memory and forces the estimate to track a fresh quorum of recent fixes
//! rather than accumulate stale beacons.

use crate::core::{BeaconEntry, PlanarPosition, REGISTRY_CAPACITY};

/// Working set of beacon fixes for the current epoch.
///
/// Entries are kept in order of first appearance: an update to an already
/// known beacon overwrites its position in place and keeps its slot. The
/// solver relies on this order being stable within an epoch.
#[derive(Debug, Clone)]
pub struct BeaconRegistry {
    entries: Vec<BeaconEntry>,
    capacity: usize,
    epoch: u64,
}

impl Default for BeaconRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BeaconRegistry {
    /// Create a registry with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(REGISTRY_CAPACITY)
    }

    /// Create a registry with a specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "registry capacity must be positive");
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            epoch: 0,
        }
    }

    /// Insert or overwrite the entry for `id`, returning the new size.
    ///
    /// Size counts distinct ids: repeated upserts of one beacon never grow
    /// the set, so a single beacon can never trigger the capacity reset.
    pub fn upsert(&mut self, id: &str, position: PlanarPosition) -> usize {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == id) {
            existing.position = position;
        } else {
            self.entries.push(BeaconEntry {
                id: id.to_string(),
                position,
            });
        }

        assert!(
            self.entries.len() <= self.capacity,
            "registry grew past capacity"
        );
        self.entries.len()
    }

    /// True when the working set has filled the current epoch
    pub fn is_at_capacity(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Remove all entries and advance the epoch counter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of capacity-triggered resets so far
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Copy of the current entries, safe to retain after the registry moves on
    pub fn snapshot_entries(&self) -> Vec<BeaconEntry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_inserts_distinct_ids() {
        let mut registry = BeaconRegistry::new();
        assert_eq!(registry.upsert("A", PlanarPosition::new(0.0, 0.0)), 1);
        assert_eq!(registry.upsert("B", PlanarPosition::new(1.0, 1.0)), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_upsert_same_id_overwrites_in_place() {
        let mut registry = BeaconRegistry::new();
        registry.upsert("A", PlanarPosition::new(0.0, 0.0));
        registry.upsert("B", PlanarPosition::new(1.0, 1.0));
        let size = registry.upsert("A", PlanarPosition::new(5.0, 5.0));

        assert_eq!(size, 2);
        let entries = registry.snapshot_entries();
        // "A" keeps its original slot with the updated position
        assert_eq!(entries[0].id, "A");
        assert_eq!(entries[0].position, PlanarPosition::new(5.0, 5.0));
        assert_eq!(entries[1].id, "B");
    }

    #[test]
    fn test_capacity_detection() {
        let mut registry = BeaconRegistry::new();
        for (i, id) in ["A", "B", "C", "D"].iter().enumerate() {
            registry.upsert(id, PlanarPosition::new(i as f64, 0.0));
        }
        assert!(registry.is_at_capacity());
    }

    #[test]
    fn test_single_beacon_never_reaches_capacity() {
        let mut registry = BeaconRegistry::new();
        for i in 0..10 {
            registry.upsert("A", PlanarPosition::new(i as f64, 0.0));
        }
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_at_capacity());
    }

    #[test]
    fn test_clear_empties_and_advances_epoch() {
        let mut registry = BeaconRegistry::new();
        registry.upsert("A", PlanarPosition::new(0.0, 0.0));
        registry.upsert("B", PlanarPosition::new(1.0, 1.0));
        assert_eq!(registry.epoch(), 0);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.epoch(), 1);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut registry = BeaconRegistry::new();
        registry.upsert("A", PlanarPosition::new(0.0, 0.0));
        let snapshot = registry.snapshot_entries();

        registry.upsert("A", PlanarPosition::new(9.0, 9.0));
        registry.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].position, PlanarPosition::new(0.0, 0.0));
    }
}
