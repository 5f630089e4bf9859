//! Integration tests for the WebSocket transport.
//!
//! These tests verify the real transport layer works by connecting actual
//! WebSocket clients to an in-process server.

#![cfg(feature = "transport")]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use huddle_client::transport;
use huddle_client::ConnectConfig;
use huddle_proto::{ClientFrame, PartyRef, ServerFrame, WireMessage};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

/// Fast retry policy so failure tests finish quickly.
fn quick_config() -> ConnectConfig {
    ConnectConfig {
        reconnect_attempts: 2,
        reconnect_delay: Duration::from_millis(10),
        connect_timeout: Duration::from_secs(2),
    }
}

fn history_frame() -> ServerFrame {
    ServerFrame::ChatHistory(vec![WireMessage {
        id: Some("m1".into()),
        sender_id: PartyRef::Id("u2".into()),
        receiver_id: None,
        content: "hi".into(),
        created_at: None,
    }])
}

#[tokio::test]
async fn client_exchanges_frames_with_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();

        // Expect a join, answer with history.
        let inbound = socket.next().await.unwrap().unwrap();
        let frame = ClientFrame::decode(inbound.to_text().unwrap()).unwrap();
        assert_eq!(frame, ClientFrame::JoinRoom { booking_id: "b1".into() });

        let text = history_frame().encode().unwrap();
        socket.send(Message::Text(text.into())).await.unwrap();
    });

    let mut transport =
        transport::connect(&format!("ws://{addr}"), None, &quick_config()).await.unwrap();

    transport
        .to_server
        .send(ClientFrame::JoinRoom { booking_id: "b1".into() })
        .await
        .unwrap();

    let frame = timeout(Duration::from_secs(5), transport.from_server.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(frame, history_frame());

    server.await.unwrap();
    transport.stop();
}

#[tokio::test]
async fn token_rides_as_query_parameter() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let socket = tokio_tungstenite::accept_hdr_async(
            stream,
            |req: &tokio_tungstenite::tungstenite::handshake::server::Request, resp| {
                assert_eq!(req.uri().query(), Some("token=t0ken"));
                Ok(resp)
            },
        )
        .await
        .unwrap();
        drop(socket);
    });

    let transport =
        transport::connect(&format!("ws://{addr}"), Some("t0ken"), &quick_config())
            .await
            .unwrap();

    server.await.unwrap();
    transport.stop();
}

#[tokio::test]
async fn malformed_frames_are_skipped() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();

        socket.send(Message::Text("not json".into())).await.unwrap();
        let text = history_frame().encode().unwrap();
        socket.send(Message::Text(text.into())).await.unwrap();
    });

    let mut transport =
        transport::connect(&format!("ws://{addr}"), None, &quick_config()).await.unwrap();

    // The bad frame is dropped; the good one still arrives.
    let frame = timeout(Duration::from_secs(5), transport.from_server.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(frame, history_frame());

    server.await.unwrap();
    transport.stop();
}

#[tokio::test]
async fn connect_fails_after_retry_budget() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = transport::connect(&format!("ws://{addr}"), None, &quick_config()).await;

    assert!(matches!(
        result,
        Err(transport::TransportError::Connection { attempts: 2, .. })
    ));
}
