//! Tungstenite-based WebSocket adapter.
//!
//! Spawns [`run_connection`] on the current tokio runtime for every logical
//! connection and forwards its events into the app's queue.

use tokio::sync::mpsc;
use tracing::debug;

use crate::app::AppMessage;
use crate::traits::WebSocketConnector;
use crate::websocket::{run_connection, WsOutgoingMessage};

/// WebSocket connector using tokio-tungstenite.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

impl WebSocketConnector for TungsteniteConnector {
    fn open(
        &self,
        url: &str,
        generation: u64,
        events: mpsc::UnboundedSender<AppMessage>,
    ) -> mpsc::UnboundedSender<WsOutgoingMessage> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        debug!("Opening connection #{} to {}", generation, url);
        tokio::spawn(run_connection(url.to_string(), outbound_rx, move |event| {
            // The app may already be shutting down
            let _ = events.send(AppMessage::Transport { generation, event });
        }));

        outbound_tx
    }
}
