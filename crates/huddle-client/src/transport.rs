//! WebSocket transport for the session.
//!
//! Provides [`ConnectedTransport`], which handles socket I/O for the JSON
//! event frames. This is a thin layer that just sends/receives frames;
//! protocol logic stays in the sans-IO [`crate::ChatSession`].
//!
//! The retry policy lives entirely here, per the connection contract: a
//! bounded number of attempts at a fixed interval, each with its own
//! connection timeout. The session layers no policy on top.

use futures_util::{SinkExt, StreamExt};
use huddle_proto::{ClientFrame, ServerFrame};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::connection::ConnectConfig;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established within the retry budget.
    #[error("connection failed after {attempts} attempts: {reason}")]
    Connection {
        /// Attempts made before giving up.
        attempts: u32,
        /// Last failure description.
        reason: String,
    },

    /// Socket stream error.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Handle to a connected transport.
///
/// Frames are exchanged via the channels; an internal task owns the socket.
pub struct ConnectedTransport {
    /// Send frames to the server.
    pub to_server: mpsc::Sender<ClientFrame>,
    /// Receive frames from the server. Closes when the socket does.
    pub from_server: mpsc::Receiver<ServerFrame>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedTransport {
    /// Stop the connection task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect to the chat server via WebSocket.
///
/// The bearer token, when present, rides as a `token` query parameter.
/// Returns a [`ConnectedTransport`] with channels for frame transport.
pub async fn connect(
    url: &str,
    token: Option<&str>,
    config: &ConnectConfig,
) -> Result<ConnectedTransport, TransportError> {
    let url = match token {
        Some(token) if url.contains('?') => format!("{url}&token={token}"),
        Some(token) => format!("{url}?token={token}"),
        None => url.to_string(),
    };

    let socket = establish(&url, config).await?;
    let (to_server_tx, to_server_rx) = mpsc::channel::<ClientFrame>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<ServerFrame>(32);

    let handle = tokio::spawn(run_connection(socket, to_server_rx, from_server_tx));

    Ok(ConnectedTransport {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Dial with the configured timeout and bounded retry.
async fn establish(
    url: &str,
    config: &ConnectConfig,
) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, TransportError> {
    let attempts = config.reconnect_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match tokio::time::timeout(config.connect_timeout, connect_async(url)).await {
            Ok(Ok((socket, _response))) => {
                tracing::debug!(%url, attempt, "websocket connected");
                return Ok(socket);
            },
            Ok(Err(e)) => last_error = e.to_string(),
            Err(_) => last_error = format!("timed out after {:?}", config.connect_timeout),
        }
        tracing::warn!(attempt, error = %last_error, "websocket connect attempt failed");
        if attempt < attempts {
            tokio::time::sleep(config.reconnect_delay).await;
        }
    }

    Err(TransportError::Connection { attempts, reason: last_error })
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut to_server: mpsc::Receiver<ClientFrame>,
    from_server: mpsc::Sender<ServerFrame>,
) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(frame) = outgoing else { break };
                let text = match frame.encode() {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "dropping unencodable frame");
                        continue;
                    },
                };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    tracing::warn!(error = %e, "websocket send failed");
                    break;
                }
            },
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => match ServerFrame::decode(text.as_str()) {
                        Ok(frame) => {
                            if from_server.send(frame).await.is_err() {
                                break;
                            }
                        },
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping malformed frame");
                        },
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {},
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "websocket receive failed");
                        break;
                    },
                }
            },
        }
    }
}
