//! WebSocket connector trait abstraction.
//!
//! The connection manager never touches sockets directly. It asks a
//! [`WebSocketConnector`] to open a logical connection and gets back the
//! outbound half; everything the connection observes comes back through the
//! app's event queue as [`AppMessage::Transport`].

use tokio::sync::mpsc;

use crate::app::AppMessage;
use crate::websocket::WsOutgoingMessage;

/// Trait for opening WebSocket connections.
///
/// # Contract
///
/// `open` returns immediately. The connection then reports, tagged with
/// `generation`, at most one `Opened`, any number of `Frame`s, optionally an
/// `Error`, and finally exactly one `Closed`. Dropping the returned sender
/// discards the connection; a discarded connection may stop reporting.
///
/// # Example
///
/// ```ignore
/// use stepgate::adapters::TungsteniteConnector;
/// use stepgate::traits::WebSocketConnector;
///
/// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
/// let outbound = TungsteniteConnector.open("ws://127.0.0.1:8000/ws", 1, tx);
/// ```
pub trait WebSocketConnector: Send + Sync {
    /// Open a new logical connection to `url`.
    fn open(
        &self,
        url: &str,
        generation: u64,
        events: mpsc::UnboundedSender<AppMessage>,
    ) -> mpsc::UnboundedSender<WsOutgoingMessage>;
}
