//! System parameters for registry sizing and solving

/// Number of distinct beacons that triggers a full registry reset.
///
/// The working set never holds more than one epoch of fixes: reaching this
/// many distinct beacons clears the registry so the estimate tracks a fresh
/// quorum of recent positions instead of accumulating stale ones.
pub const REGISTRY_CAPACITY: usize = 4;

/// Minimum number of beacons required before a position can be solved.
pub const SOLVE_QUORUM: usize = 3;

/// Default WebSocket endpoint for the beacon stream.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:4001";
