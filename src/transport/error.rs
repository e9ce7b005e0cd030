//! Transport error types for the ingestion stream

use std::fmt;

/// Errors reported by the ingestion transport.
///
/// All of these are collaborator-boundary events: they are logged and drive
/// the pipeline to its terminal state, but never propagate as crashes. The
/// core performs no retries; reconnection is the transport owner's decision
/// and starts a fresh pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Could not establish the connection
    Connect { details: String },
    /// Connection broke after it was established
    ConnectionLost { details: String },
    /// Peer violated the message protocol
    Protocol { details: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect { details } => {
                write!(f, "Connection failed: {}", details)
            }
            TransportError::ConnectionLost { details } => {
                write!(f, "Connection lost: {}", details)
            }
            TransportError::Protocol { details } => {
                write!(f, "Protocol error: {}", details)
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
