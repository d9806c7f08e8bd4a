//! Connection lifecycle: one logical WebSocket connection at a time, replaced
//! after a fixed delay whenever it closes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::traits::WebSocketConnector;
use crate::websocket::{WsError, WsOutgoingMessage};

use super::AppMessage;

/// Owns the current connection and the reconnect timer.
///
/// `connected` is only ever changed here. Events are matched against
/// `generation` so a late report from a replaced connection has no effect.
pub struct ConnectionManager {
    url: String,
    reconnect_delay: Duration,
    connector: Arc<dyn WebSocketConnector>,
    events_tx: mpsc::UnboundedSender<AppMessage>,
    /// Outbound half of the current connection; `None` once it has closed
    outbound: Option<mpsc::UnboundedSender<WsOutgoingMessage>>,
    generation: u64,
    connected: bool,
    reconnect_pending: bool,
    /// Connect attempts since the last successful open
    failed_attempts: u32,
}

impl ConnectionManager {
    pub fn new(
        url: impl Into<String>,
        reconnect_delay: Duration,
        connector: Arc<dyn WebSocketConnector>,
        events_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            connector,
            events_tx,
            outbound: None,
            generation: 0,
            connected: false,
            reconnect_pending: false,
            failed_attempts: 0,
        }
    }

    /// Open a new logical connection, discarding the current one.
    pub fn connect(&mut self) -> u64 {
        self.generation += 1;
        self.connected = false;
        self.reconnect_pending = false;

        if self.failed_attempts > 0 {
            info!(
                "Reconnecting to {} (attempt #{})",
                self.url,
                self.failed_attempts + 1
            );
        } else {
            info!("Connecting to {}", self.url);
        }

        self.outbound = Some(
            self.connector
                .open(&self.url, self.generation, self.events_tx.clone()),
        );
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The current connection opened. Returns false for stale events.
    pub fn mark_open(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) || self.outbound.is_none() {
            debug!("Ignoring open from stale connection #{}", generation);
            return false;
        }
        self.connected = true;
        self.failed_attempts = 0;
        true
    }

    /// The current connection closed.
    ///
    /// Returns true the first time it is called for the current generation,
    /// after which exactly one reconnect is scheduled.
    pub fn mark_closed(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) || self.outbound.is_none() {
            debug!("Ignoring close from stale connection #{}", generation);
            return false;
        }
        self.connected = false;
        self.outbound = None;
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.schedule_reconnect();
        true
    }

    fn schedule_reconnect(&mut self) {
        if self.reconnect_pending {
            return;
        }
        self.reconnect_pending = true;

        let generation = self.generation;
        let delay = self.reconnect_delay;
        let tx = self.events_tx.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            debug!("Reconnect scheduled in {:?}", delay);
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(AppMessage::ReconnectDue { generation });
            });
        } else {
            warn!("No tokio runtime, reconnect must be triggered manually");
        }
    }

    /// The reconnect timer fired. Returns true if a new connection was opened.
    pub fn reconnect_due(&mut self, generation: u64) -> bool {
        if !self.reconnect_pending || !self.is_current(generation) {
            return false;
        }
        self.connect();
        true
    }

    /// Write a message on the current connection.
    pub fn send(&self, msg: WsOutgoingMessage) -> Result<(), WsError> {
        if !self.connected {
            return Err(WsError::Disconnected);
        }
        match &self.outbound {
            Some(tx) => tx
                .send(msg)
                .map_err(|e| WsError::SendFailed(e.to_string())),
            None => Err(WsError::Disconnected),
        }
    }
}
