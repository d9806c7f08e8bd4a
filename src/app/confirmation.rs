//! Confirmation handshake between the gate, the dialog and the connection.

use tracing::{info, warn};

use crate::error::Categorized;
use crate::state::{ConfirmationRequest, Decision};

use super::types::DialogButton;
use super::App;

impl App {
    /// Show the dialog for `request`, unless one is already open.
    pub fn open_confirmation(&mut self, request: ConfirmationRequest) {
        let confirm_id = request.confirm_id.clone();
        let step_index = request.step_index;

        match self.gate.open(request) {
            Ok(()) => {
                info!("Confirmation {} requested for step {}", confirm_id, step_index);
                self.dialog_selection = DialogButton::default();
            }
            Err(err) => {
                warn!(category = %err.category(), "{}", err);
                self.log.error(format!(
                    "Ignored confirmation request for step {}: another step is awaiting a decision",
                    step_index
                ));
            }
        }
    }

    /// Apply the user's decision to the pending request, if any.
    pub fn decide(&mut self, decision: Decision) {
        let Some(resolution) = self.gate.resolve(decision) else {
            return;
        };

        match self.connection.send(resolution.to_message()) {
            Ok(()) => {
                info!(
                    "Sent decision for {}: approved={}",
                    resolution.request.confirm_id, resolution.approved
                );
                if resolution.approved {
                    self.log.success("User approved the step");
                } else {
                    self.log.warning("User denied the step");
                }
            }
            Err(err) => {
                warn!(
                    category = %err.category(),
                    "Decision for {} not delivered: {}",
                    resolution.request.confirm_id,
                    err
                );
                self.log.warning(format!(
                    "Decision for step {} not delivered: not connected to server",
                    resolution.request.step_index
                ));
            }
        }
    }
}
