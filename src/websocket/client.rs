use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use super::messages::{WsIncomingMessage, WsOutgoingMessage};

/// Fixed delay between a connection closing and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;

/// How long the TCP connect plus WebSocket upgrade may take.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// WebSocket connection errors
#[derive(Debug, Clone, PartialEq)]
pub enum WsError {
    ConnectionFailed(String),
    Disconnected,
    SendFailed(String),
    ParseError(String),
}

impl std::fmt::Display for WsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WsError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            WsError::Disconnected => write!(f, "Disconnected from server"),
            WsError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            WsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for WsError {}

/// Lifecycle events reported by one transport connection.
///
/// A connection reports `Opened` at most once and always finishes with
/// exactly one `Closed`, including when the initial connect fails. `Error`
/// is only ever followed by `Closed`.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Opened,
    Frame(WsIncomingMessage),
    Error(String),
    Closed,
}

/// Configuration for the WebSocket connection
#[derive(Debug, Clone, PartialEq)]
pub struct WsClientConfig {
    /// Server address as `host:port`
    pub host: String,
    /// Use `wss://` instead of `ws://`
    pub use_tls: bool,
    /// Delay before reconnecting after the connection closes
    pub reconnect_delay: Duration,
}

impl Default for WsClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:8000".to_string(),
            use_tls: false,
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
        }
    }
}

impl WsClientConfig {
    /// Set the server address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Enable or disable TLS.
    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Set the reconnect delay.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Full socket URL, e.g. `ws://127.0.0.1:8000/ws`.
    pub fn url(&self) -> String {
        let scheme = if self.use_tls { "wss" } else { "ws" };
        format!("{}://{}/ws", scheme, self.host)
    }
}

/// Drive a single connection from connect to close.
///
/// Incoming text frames are classified and handed to `emit`; messages received
/// on `outbound_rx` are serialized and written to the socket. Returns without
/// emitting `Closed` only when `outbound_rx` is dropped, which means the owner
/// has discarded this connection.
pub async fn run_connection<F>(
    url: String,
    outbound_rx: mpsc::UnboundedReceiver<WsOutgoingMessage>,
    emit: F,
) where
    F: Fn(TransportEvent) + Send + 'static,
{
    run_connection_with_timeout(url, HANDSHAKE_TIMEOUT, outbound_rx, emit).await
}

/// [`run_connection`] with a custom handshake deadline. A peer that accepts
/// TCP but never finishes the upgrade is reported as `Error` then `Closed`.
pub async fn run_connection_with_timeout<F>(
    url: String,
    handshake_timeout: Duration,
    mut outbound_rx: mpsc::UnboundedReceiver<WsOutgoingMessage>,
    emit: F,
) where
    F: Fn(TransportEvent) + Send + 'static,
{
    let connected = match tokio::time::timeout(handshake_timeout, connect_async(&url)).await {
        Ok(Ok((stream, _))) => Ok(stream),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("handshake timed out after {:?}", handshake_timeout)),
    };
    let ws_stream = match connected {
        Ok(stream) => stream,
        Err(reason) => {
            warn!("Failed to connect to {}: {}", url, reason);
            emit(TransportEvent::Error(WsError::ConnectionFailed(reason).to_string()));
            emit(TransportEvent::Closed);
            return;
        }
    };

    info!("Connected to WebSocket server at {}", url);
    emit(TransportEvent::Opened);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received frame: {}", text);
                        emit(TransportEvent::Frame(WsIncomingMessage::from_frame(&text)));
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Received close frame from server");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary, pong and raw frames carry nothing for us
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        emit(TransportEvent::Error(e.to_string()));
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                }
            }
            outgoing = outbound_rx.recv() => {
                match outgoing {
                    Some(msg) => {
                        let json = match serde_json::to_string(&msg) {
                            Ok(json) => json,
                            Err(e) => {
                                error!("Failed to serialize message: {}", e);
                                continue;
                            }
                        };
                        debug!("Sending frame: {}", json);
                        if let Err(e) = ws_sink.send(Message::Text(json)).await {
                            error!("Failed to send message: {}", e);
                            emit(TransportEvent::Error(WsError::SendFailed(e.to_string()).to_string()));
                            break;
                        }
                    }
                    None => {
                        debug!("Connection discarded by owner, closing socket");
                        let _ = ws_sink.close().await;
                        return;
                    }
                }
            }
        }
    }

    emit(TransportEvent::Closed);
}
