//! WebSocket STOMP client.
//!
//! [`StompClient`] holds the broker URL for one endpoint. Call
//! [`StompClient::connect`] to perform the WebSocket upgrade and the
//! STOMP `CONNECT`/`CONNECTED` handshake, yielding a live
//! [`StompConnection`].

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, MaybeTlsStream};
use tokio_tungstenite::tungstenite::Message;

use crate::frame::{Command, Frame};

/// Configuration handle for a STOMP broker endpoint.
pub struct StompClient {
    ws_url: String,
}

/// A live, authenticated STOMP session over WebSocket.
pub struct StompConnection {
    /// Client-generated id correlating log lines for this session.
    session_id: String,
    ws_stream: tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    subscription_seq: u32,
}

/// Errors produced by the STOMP client.
#[derive(Debug, thiserror::Error)]
pub enum StompError {
    /// The WebSocket connection or handshake failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport failed on an established connection.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame could not be parsed or violated the protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The broker reported an error frame during the handshake.
    #[error("Broker error: {0}")]
    Broker(String),
}

impl StompClient {
    /// Create a client targeting a full WebSocket URL, e.g.
    /// `ws://localhost:8081/ws`.
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
        }
    }

    /// WebSocket URL this client connects to.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Open the WebSocket and complete the STOMP handshake.
    ///
    /// Sends `CONNECT` (accept-version 1.2) and waits for the broker's
    /// `CONNECTED` frame. An `ERROR` frame during the handshake is
    /// surfaced as [`StompError::Broker`].
    pub async fn connect(&self) -> Result<StompConnection, StompError> {
        let (ws_stream, _response) = connect_async(&self.ws_url).await.map_err(|e| {
            StompError::Connection(format!("Failed to connect to {}: {e}", self.ws_url))
        })?;

        let session_id = uuid::Uuid::new_v4().to_string();
        let mut conn = StompConnection {
            session_id,
            ws_stream,
            subscription_seq: 0,
        };

        conn.send_frame(Frame::connect(host_of(&self.ws_url))).await?;

        loop {
            match conn.next_frame().await {
                Some(Ok(frame)) => match frame.command {
                    Command::Connected => {
                        tracing::info!(
                            session_id = %conn.session_id,
                            version = frame.header("version").unwrap_or("?"),
                            "Connected to STOMP broker at {}",
                            self.ws_url,
                        );
                        return Ok(conn);
                    }
                    Command::Error => {
                        let message = frame.header("message").unwrap_or(&frame.body).to_string();
                        return Err(StompError::Broker(message));
                    }
                    other => {
                        tracing::debug!(command = other.as_str(), "Ignoring pre-handshake frame");
                    }
                },
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(StompError::Connection(
                        "Connection closed during STOMP handshake".to_string(),
                    ))
                }
            }
        }
    }
}

impl StompConnection {
    /// Client-generated session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Subscribe to a destination with automatic acknowledgement.
    ///
    /// Returns the client-assigned subscription id.
    pub async fn subscribe(&mut self, destination: &str) -> Result<String, StompError> {
        let id = format!("sub-{}", self.subscription_seq);
        self.subscription_seq += 1;
        self.send_frame(Frame::subscribe(&id, destination)).await?;
        tracing::info!(
            session_id = %self.session_id,
            subscription = %id,
            destination,
            "Subscribed",
        );
        Ok(id)
    }

    /// Send a body to an application destination.
    pub async fn send(
        &mut self,
        destination: &str,
        content_type: &str,
        body: impl Into<String>,
    ) -> Result<(), StompError> {
        self.send_frame(Frame::send(destination, content_type, body))
            .await
    }

    /// Write a raw frame to the socket.
    pub async fn send_frame(&mut self, frame: Frame) -> Result<(), StompError> {
        self.ws_stream
            .send(Message::Text(frame.encode()))
            .await
            .map_err(|e| StompError::Transport(e.to_string()))
    }

    /// Read the next STOMP frame.
    ///
    /// Heart-beats, pings and binary payloads are skipped. Returns
    /// `None` once the peer closes the connection or the stream is
    /// exhausted.
    pub async fn next_frame(&mut self) -> Option<Result<Frame, StompError>> {
        while let Some(msg_result) = self.ws_stream.next().await {
            match msg_result {
                Ok(Message::Text(text)) => {
                    // A lone EOL is a STOMP heart-beat, not a frame.
                    if text.trim_matches(['\r', '\n']).is_empty() {
                        continue;
                    }
                    return Some(
                        Frame::parse(&text).map_err(|e| StompError::Protocol(e.to_string())),
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Handled automatically by tungstenite.
                }
                Ok(Message::Binary(_)) => {
                    tracing::trace!(session_id = %self.session_id, "Ignoring binary message");
                }
                Ok(Message::Close(frame)) => {
                    tracing::info!(session_id = %self.session_id, ?frame, "Broker closed WebSocket");
                    return None;
                }
                Ok(Message::Frame(_)) => {}
                Err(e) => return Some(Err(StompError::Transport(e.to_string()))),
            }
        }
        None
    }

    /// Send `DISCONNECT` and close the socket.
    ///
    /// The receipt is requested but not awaited; the close frame follows
    /// immediately, matching a user-initiated page disconnect.
    pub async fn disconnect(mut self) -> Result<(), StompError> {
        let receipt_id = format!("receipt-{}", uuid::Uuid::new_v4());
        self.send_frame(Frame::disconnect(&receipt_id)).await?;
        self.ws_stream
            .close(None)
            .await
            .map_err(|e| StompError::Transport(e.to_string()))?;
        tracing::info!(session_id = %self.session_id, "Disconnected from broker");
        Ok(())
    }
}

/// Host component of a WebSocket URL, for the `CONNECT` host header.
fn host_of(ws_url: &str) -> &str {
    let rest = ws_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(ws_url);
    let end = rest.find([':', '/', '?']).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_extracts_hostname() {
        assert_eq!(host_of("ws://localhost:8081/ws"), "localhost");
        assert_eq!(host_of("wss://broker.example.com/ws"), "broker.example.com");
        assert_eq!(host_of("ws://127.0.0.1/ws"), "127.0.0.1");
        assert_eq!(host_of("localhost"), "localhost");
    }

    #[tokio::test]
    async fn connect_to_closed_port_reports_connection_error() {
        // Port 9 (discard) is expected to refuse the connection.
        let client = StompClient::new("ws://127.0.0.1:9/ws");
        let err = client.connect().await.unwrap_err();
        assert!(matches!(err, StompError::Connection(_)));
    }
}
