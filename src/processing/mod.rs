//! Inbound message processing: frame decoding and working-set management

pub mod decoder;
pub mod registry;

pub use decoder::{DecodeError, DecodeResult, FrameDecoder};
pub use registry::BeaconRegistry;
