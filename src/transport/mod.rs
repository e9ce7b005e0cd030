//! Ingestion transport for the beacon stream
//!
//! The transport is a collaborator of the estimation pipeline, not part of
//! it: it owns the connection lifecycle and forwards arrival events to the
//! pipeline's handlers. Reconnect policy lives with whoever runs the
//! transport; a new connection gets a new pipeline instance.

pub mod error;
pub mod ws;

pub use error::{TransportError, TransportResult};
pub use ws::BeaconStream;
