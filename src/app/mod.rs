//! Application state and logic for the TUI.
//!
//! [`App`] holds all client state. Every transition runs on the dispatcher
//! task through one of its methods:
//! - [`App::handle_message`] for background events ([`AppMessage`])
//! - [`App::handle_key_event`] / [`App::handle_mouse_event`] for input
//!
//! Background work (the socket, HTTP calls, the reconnect timer) only talks
//! back by sending `AppMessage`s.

mod confirmation;
mod connection;
mod handlers;
mod keys;
mod messages;
mod router;
mod submit;
mod types;

pub use connection::ConnectionManager;
pub use messages::AppMessage;
pub use submit::{fetch_health, post_task, HealthStatus, SubmitError, SubmitOutcome};
pub use types::{DialogButton, Focus};

use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::mpsc;

use crate::adapters::{ReqwestHttpClient, TungsteniteConnector};
use crate::config::ClientConfig;
use crate::state::{ConfirmationGate, LogPanel};
use crate::traits::{HttpClient, WebSocketConnector};
use crate::ui::interaction::HitAreaRegistry;
use crate::widgets::InputBox;

/// Main application state
pub struct App {
    pub config: ClientConfig,
    /// Flag to quit the application
    pub should_quit: bool,
    /// Log panel contents
    pub log: LogPanel,
    /// Step awaiting the user's decision, if any
    pub gate: ConfirmationGate,
    pub connection: ConnectionManager,
    /// Task goal input
    pub input: InputBox,
    pub focus: Focus,
    /// Highlighted button in the confirmation dialog
    pub dialog_selection: DialogButton,
    /// A task submission is in flight
    pub submitting: bool,
    pub http: Arc<dyn HttpClient>,
    /// Receiver for async messages; taken by the main loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Clickable regions registered by the last render
    pub hit_areas: HitAreaRegistry,
    /// Whether the UI needs to be redrawn
    pub needs_redraw: bool,
}

impl App {
    /// Create an App wired to the real network adapters.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        Ok(Self::with_adapters(
            config,
            Arc::new(http),
            Arc::new(TungsteniteConnector),
        ))
    }

    /// Create an App with injected adapters.
    pub fn with_adapters(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        connector: Arc<dyn WebSocketConnector>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let connection = ConnectionManager::new(
            config.ws_url(),
            config.reconnect_delay,
            connector,
            message_tx.clone(),
        );

        Self {
            config,
            should_quit: false,
            log: LogPanel::new(),
            gate: ConfirmationGate::default(),
            connection,
            input: InputBox::new(),
            focus: Focus::default(),
            dialog_selection: DialogButton::default(),
            submitting: false,
            http,
            message_rx: Some(message_rx),
            message_tx,
            hit_areas: HitAreaRegistry::new(),
            needs_redraw: true,
        }
    }

    /// Open the first connection and run the health check.
    pub fn start(&mut self) {
        self.log
            .info(format!("Connecting to {}", self.connection.url()));
        self.connection.connect();
        self.check_health();
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// The submit control accepts clicks
    pub fn submit_enabled(&self) -> bool {
        self.is_connected() && !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Run task"
        }
    }

    /// Handle every message already queued. Used when nothing else owns the
    /// receiver.
    pub fn drain_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Some(msg) = self
            .message_rx
            .as_mut()
            .and_then(|rx| rx.try_recv().ok())
        {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }

    /// Mark the UI as needing a redraw
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{connected_app, test_app};

    #[test]
    fn test_submit_enablement_tracks_state() {
        let (app, _) = test_app();
        assert!(!app.submit_enabled());

        let (mut app, _) = connected_app();
        assert!(app.submit_enabled());
        assert_eq!(app.submit_label(), "Run task");

        app.submitting = true;
        assert!(!app.submit_enabled());
        assert_eq!(app.submit_label(), "Submitting...");
    }

    #[test]
    fn test_mark_dirty() {
        let (mut app, _) = test_app();
        app.needs_redraw = false;
        app.mark_dirty();
        assert!(app.needs_redraw);
    }
}
