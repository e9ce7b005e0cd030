//! Core types and constants for the beacon positioning pipeline

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
