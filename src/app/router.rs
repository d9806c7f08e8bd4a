//! Routing of inbound server messages.

use tracing::{debug, warn};

use crate::error::Categorized;
use crate::websocket::{WsError, WsIncomingMessage};

use super::App;

/// Longest slice of a malformed frame copied into diagnostics
const RAW_PREVIEW_CHARS: usize = 200;

impl App {
    /// Dispatch one inbound message by type.
    pub fn route_message(&mut self, msg: WsIncomingMessage) {
        match msg {
            WsIncomingMessage::Connected(connected) => {
                self.log.info(connected.message);
            }
            WsIncomingMessage::Log(log) => {
                self.log.push(log.message, log.level);
            }
            WsIncomingMessage::ConfirmRequest(request) => {
                self.open_confirmation(request.into());
            }
            WsIncomingMessage::Unrecognized { type_name } => {
                debug!("Ignoring message of unknown type {:?}", type_name);
            }
            WsIncomingMessage::ParseError { error, raw } => {
                let err = WsError::ParseError(error);
                let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
                warn!(category = %err.category(), "Dropped malformed message: {} ({})", err, preview);
                self.log.warning("Dropped malformed message from server");
            }
        }
    }
}
