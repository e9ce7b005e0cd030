//! Beacon position fixing
//!
//! Ingests a live stream of beacon observation messages, maintains a bounded
//! working set of the most recent beacon positions, derives an estimated
//! observer position, and republishes working set + estimate as immutable
//! snapshots that any renderer can consume on its own schedule.

pub mod core;
pub mod processing;
pub mod algorithms;
pub mod pipeline;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{BeaconEntry, Observation, PlanarPosition, Snapshot};
pub use crate::core::{DEFAULT_ENDPOINT, REGISTRY_CAPACITY, SOLVE_QUORUM};
pub use crate::algorithms::CentroidSolver;
pub use crate::pipeline::{EstimationPipeline, PipelineState};
pub use crate::processing::{BeaconRegistry, DecodeError, FrameDecoder};
pub use crate::transport::{BeaconStream, TransportError, TransportResult};
pub use crate::utils::{ConfigError, SystemConfig};
