//! WebSocket client delivering raw text frames to the pipeline

use crate::pipeline::EstimationPipeline;
use crate::transport::{TransportError, TransportResult};
use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace};

/// WebSocket ingestion stream for one connection.
///
/// Connects to the endpoint, reports `open` to the pipeline, then forwards
/// every text frame from the receive loop. Frames the pipeline rejects never
/// crash the loop; only transport failures end it.
pub struct BeaconStream {
    endpoint: String,
}

impl BeaconStream {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run the receive loop until the stream ends.
    ///
    /// Returns `Ok(())` on an orderly close and the transport error
    /// otherwise. Either way the pipeline has been driven to its terminal
    /// state before this returns.
    pub async fn run(&self, pipeline: &EstimationPipeline) -> TransportResult<()> {
        let (mut socket, _response) =
            connect_async(self.endpoint.as_str())
                .await
                .map_err(|e| TransportError::Connect {
                    details: e.to_string(),
                })?;
        debug!(endpoint = %self.endpoint, "Connected to beacon stream");
        pipeline.handle_open();

        while let Some(message) = socket.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    trace!(frame = %text, "Received message");
                    pipeline.handle_frame(&text);
                }
                Ok(Message::Binary(payload)) => {
                    debug!(len = payload.len(), "Ignoring binary frame");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    trace!("Keep-alive frame");
                }
                Ok(Message::Close(_)) => {
                    debug!("Server closed the beacon stream");
                    break;
                }
                Ok(Message::Frame(_)) => {}
                Err(e) => {
                    let error = TransportError::ConnectionLost {
                        details: e.to_string(),
                    };
                    pipeline.handle_error(&error);
                    return Err(error);
                }
            }
        }

        pipeline.handle_close();
        Ok(())
    }
}
