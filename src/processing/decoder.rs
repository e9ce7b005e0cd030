//! Decoder for inbound beacon observation frames
//!
//! One text frame carries one JSON object:
//!
//! ```text
//! { "id": <string>, "x": <number>, "y": <number>, "distance": <number, optional> }
//! ```
//!
//! Decoding is a pure parse with no side effects. A malformed frame is
//! message-scoped: the caller logs it and keeps streaming.

use crate::core::{Observation, PlanarPosition};
use serde::Deserialize;
use std::fmt;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Frame is not parseable as an observation: not valid JSON, required
    /// fields missing or wrong-typed, or field values out of domain
    Malformed { details: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed { details } => {
                write!(f, "Malformed observation frame: {}", details)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Wire shape of one observation frame
#[derive(Debug, Deserialize)]
struct ObservationFrame {
    id: String,
    x: f64,
    y: f64,
    distance: Option<f64>,
}

/// Decoder for beacon observation frames
#[derive(Debug, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode one raw text frame into an [`Observation`].
    ///
    /// A missing `distance` field is not an error; it is recorded as absent
    /// and only affects diagnostics, never the solve path.
    pub fn decode(&self, raw: &str) -> DecodeResult<Observation> {
        let frame: ObservationFrame =
            serde_json::from_str(raw).map_err(|e| DecodeError::Malformed {
                details: e.to_string(),
            })?;

        self.validate_frame(&frame)?;

        Ok(Observation {
            beacon_id: frame.id,
            position: PlanarPosition::new(frame.x, frame.y),
            distance: frame.distance,
        })
    }

    /// Validate field domains after the structural parse
    fn validate_frame(&self, frame: &ObservationFrame) -> DecodeResult<()> {
        if frame.id.is_empty() {
            return Err(DecodeError::Malformed {
                details: "beacon id must be non-empty".to_string(),
            });
        }

        if !frame.x.is_finite() || !frame.y.is_finite() {
            return Err(DecodeError::Malformed {
                details: format!("non-finite coordinates ({}, {})", frame.x, frame.y),
            });
        }

        if let Some(distance) = frame.distance {
            if !distance.is_finite() || distance < 0.0 {
                return Err(DecodeError::Malformed {
                    details: format!("invalid distance {}", distance),
                });
            }
        }

        Ok(())
    }
}
