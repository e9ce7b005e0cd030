//! End-to-end scenarios: a loopback WebSocket server feeding the pipeline

use beaconfix::{BeaconStream, EstimationPipeline, PipelineState, PlanarPosition, TransportError};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

/// Serve the given frames on a fresh local WebSocket server, then close
async fn serve_frames(frames: &'static [&'static str]) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
        for frame in frames {
            socket.send(Message::Text(frame.to_string())).await.unwrap();
        }
        socket.close(None).await.unwrap();
        // Drain until the close handshake completes
        while socket.next().await.is_some() {}
    });

    (format!("ws://{}", addr), server)
}

#[tokio::test]
async fn streams_frames_into_snapshots() {
    let (endpoint, server) = serve_frames(&[
        r#"{"id":"A","x":0,"y":0}"#,
        r#"{"id":"B","x":3,"y":0}"#,
        r#"{"id":"C","x":0,"y":3,"distance":4.2}"#,
    ])
    .await;

    let pipeline = Arc::new(EstimationPipeline::new());
    let mut rx = pipeline.subscribe();

    BeaconStream::new(endpoint).run(&pipeline).await.unwrap();
    server.await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Closed);
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.sequence, 3);
    assert_eq!(snapshot.beacons.len(), 3);
    assert_eq!(snapshot.estimate, Some(PlanarPosition::new(1.0, 1.0)));
}

#[tokio::test]
async fn malformed_frames_do_not_break_the_stream() {
    let (endpoint, server) = serve_frames(&[
        r#"{"id":"A","x":0,"y":0}"#,
        r#"{"id":"A","x":"oops"}"#,
        "not json at all",
        r#"{"id":"B","x":3,"y":0}"#,
        r#"{"id":"C","x":0,"y":3}"#,
    ])
    .await;

    let pipeline = Arc::new(EstimationPipeline::new());

    BeaconStream::new(endpoint).run(&pipeline).await.unwrap();
    server.await.unwrap();

    // Only the three valid frames were accepted
    let snapshot = pipeline.latest_snapshot();
    assert_eq!(snapshot.sequence, 3);
    assert_eq!(snapshot.estimate, Some(PlanarPosition::new(1.0, 1.0)));
}

#[tokio::test]
async fn capacity_reset_survives_the_wire() {
    let (endpoint, server) = serve_frames(&[
        r#"{"id":"A","x":0,"y":0}"#,
        r#"{"id":"B","x":3,"y":0}"#,
        r#"{"id":"C","x":0,"y":3}"#,
        r#"{"id":"D","x":9,"y":9}"#,
        r#"{"id":"E","x":1,"y":1}"#,
    ])
    .await;

    let pipeline = Arc::new(EstimationPipeline::new());

    BeaconStream::new(endpoint).run(&pipeline).await.unwrap();
    server.await.unwrap();

    // The 5th frame started a fresh epoch after the capacity reset
    let snapshot = pipeline.latest_snapshot();
    assert_eq!(snapshot.sequence, 5);
    assert_eq!(snapshot.epoch, 1);
    assert_eq!(snapshot.beacons.len(), 1);
    assert_eq!(snapshot.beacons[0].id, "E");
    assert_eq!(snapshot.estimate, None);
}

#[tokio::test]
async fn connect_failure_reports_transport_error() {
    // Bind then drop to get an address nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let pipeline = Arc::new(EstimationPipeline::new());
    let result = BeaconStream::new(format!("ws://{}", addr))
        .run(&pipeline)
        .await;

    assert!(matches!(result, Err(TransportError::Connect { .. })));
    // The stream never opened, so the pipeline never left Idle
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[tokio::test]
async fn subscriber_observes_updates_as_they_arrive() {
    let (endpoint, server) = serve_frames(&[
        r#"{"id":"A","x":0,"y":0}"#,
        r#"{"id":"B","x":3,"y":0}"#,
        r#"{"id":"C","x":0,"y":3}"#,
    ])
    .await;

    let pipeline = Arc::new(EstimationPipeline::new());
    let mut rx = pipeline.subscribe();

    let consumer = tokio::spawn(async move {
        let mut last = None;
        while rx.changed().await.is_ok() {
            last = Some(rx.borrow_and_update().clone());
        }
        last
    });

    BeaconStream::new(endpoint).run(&pipeline).await.unwrap();
    server.await.unwrap();

    // Closing the channel ends the consumer loop
    drop(pipeline);
    let last = consumer.await.unwrap().expect("no snapshot observed");
    assert_eq!(last.sequence, 3);
    assert_eq!(last.estimate, Some(PlanarPosition::new(1.0, 1.0)));
}
