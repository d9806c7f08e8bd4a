//! Message handling for the App.

use tracing::{debug, error};

use crate::websocket::TransportEvent;

use super::{App, AppMessage};

impl App {
    /// Handle one queued message.
    /// Every message may change what is on screen, so all of them mark the
    /// app dirty.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Transport { generation, event } => {
                self.handle_transport_event(generation, event);
            }
            AppMessage::ReconnectDue { generation } => {
                if !self.connection.reconnect_due(generation) {
                    debug!("Ignoring stale reconnect timer for #{}", generation);
                }
            }
            AppMessage::TaskSubmitted { goal, outcome } => {
                self.handle_task_submitted(goal, outcome);
            }
            AppMessage::HealthChecked(result) => {
                self.handle_health_checked(result);
            }
        }
    }

    fn handle_transport_event(&mut self, generation: u64, event: TransportEvent) {
        if !self.connection.is_current(generation) {
            debug!("Dropping event from replaced connection #{}", generation);
            return;
        }

        match event {
            TransportEvent::Opened => {
                if self.connection.mark_open(generation) {
                    self.log.info("Connected to server");
                }
            }
            TransportEvent::Frame(msg) => self.route_message(msg),
            TransportEvent::Error(err) => {
                error!("Connection error: {}", err);
                self.log.error("Connection error");
            }
            TransportEvent::Closed => {
                if self.connection.mark_closed(generation) {
                    self.log.warning("Connection lost, reconnecting...");
                }
            }
        }
    }
}
