//! Mock WebSocket connector for testing.
//!
//! Records every connection the app asks for and lets tests play the
//! server's side: inject lifecycle events and frames, and inspect what the
//! app sent back.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::app::AppMessage;
use crate::traits::WebSocketConnector;
use crate::websocket::{TransportEvent, WsIncomingMessage, WsOutgoingMessage};

/// One connection opened through the mock.
#[derive(Debug)]
struct MockConnection {
    url: String,
    generation: u64,
    events: mpsc::UnboundedSender<AppMessage>,
    outbound_rx: mpsc::UnboundedReceiver<WsOutgoingMessage>,
}

/// Mock WebSocket connector for testing.
///
/// Clones share state, so a test can keep one handle while the app owns
/// another.
///
/// # Example
///
/// ```ignore
/// use stepgate::adapters::mock::MockConnector;
/// use stepgate::websocket::TransportEvent;
///
/// let connector = MockConnector::new();
/// let mut app = App::with_adapters(config, http, Arc::new(connector.clone()));
/// app.start();
///
/// connector.emit(TransportEvent::Opened);
/// app.drain_messages();
/// assert!(app.is_connected());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    connections: Arc<Mutex<Vec<MockConnection>>>,
}

impl MockConnector {
    /// Create a new mock connector with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    fn connections(&self) -> MutexGuard<'_, Vec<MockConnection>> {
        self.connections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// How many connections have been opened so far.
    pub fn open_count(&self) -> usize {
        self.connections().len()
    }

    /// Generation tag of the most recently opened connection.
    pub fn last_generation(&self) -> Option<u64> {
        self.connections().last().map(|c| c.generation)
    }

    /// URL the most recent connection was opened against.
    pub fn last_url(&self) -> Option<String> {
        self.connections().last().map(|c| c.url.clone())
    }

    /// Report `event` from the most recently opened connection.
    ///
    /// Returns false when nothing has been opened or the app's queue is gone.
    pub fn emit(&self, event: TransportEvent) -> bool {
        match self.last_generation() {
            Some(generation) => self.emit_for(generation, event),
            None => false,
        }
    }

    /// Report `event` from the connection tagged `generation`.
    pub fn emit_for(&self, generation: u64, event: TransportEvent) -> bool {
        let connections = self.connections();
        match connections.iter().find(|c| c.generation == generation) {
            Some(conn) => conn
                .events
                .send(AppMessage::Transport { generation, event })
                .is_ok(),
            None => false,
        }
    }

    /// Deliver a server frame on the most recent connection.
    pub fn inject_frame(&self, text: &str) -> bool {
        self.emit(TransportEvent::Frame(WsIncomingMessage::from_frame(text)))
    }

    /// Drain everything the app has sent on any connection, oldest first.
    pub fn sent_messages(&self) -> Vec<WsOutgoingMessage> {
        let mut connections = self.connections();
        let mut sent = Vec::new();
        for conn in connections.iter_mut() {
            while let Ok(msg) = conn.outbound_rx.try_recv() {
                sent.push(msg);
            }
        }
        sent
    }
}

impl WebSocketConnector for MockConnector {
    fn open(
        &self,
        url: &str,
        generation: u64,
        events: mpsc::UnboundedSender<AppMessage>,
    ) -> mpsc::UnboundedSender<WsOutgoingMessage> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        self.connections().push(MockConnection {
            url: url.to_string(),
            generation,
            events,
            outbound_rx,
        });
        outbound_tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::WsConfirmResponse;

    #[test]
    fn test_open_records_connection() {
        let connector = MockConnector::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        assert_eq!(connector.open_count(), 0);
        let _out = connector.open("ws://h/ws", 3, tx);

        assert_eq!(connector.open_count(), 1);
        assert_eq!(connector.last_generation(), Some(3));
        assert_eq!(connector.last_url().as_deref(), Some("ws://h/ws"));
    }

    #[test]
    fn test_emit_tags_generation() {
        let connector = MockConnector::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _out = connector.open("ws://h/ws", 5, tx);

        assert!(connector.emit(TransportEvent::Opened));
        match rx.try_recv() {
            Ok(AppMessage::Transport { generation, event }) => {
                assert_eq!(generation, 5);
                assert_eq!(event, TransportEvent::Opened);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_emit_without_connection() {
        let connector = MockConnector::new();
        assert!(!connector.emit(TransportEvent::Closed));
    }

    #[test]
    fn test_sent_messages_drains() {
        let connector = MockConnector::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let out = connector.open("ws://h/ws", 1, tx);

        out.send(WsOutgoingMessage::ConfirmResponse(WsConfirmResponse::new(
            "c1", true,
        )))
        .unwrap();

        assert_eq!(connector.sent_messages().len(), 1);
        assert!(connector.sent_messages().is_empty());
    }
}
