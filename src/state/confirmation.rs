//! Confirmation gate: at most one step awaiting the user's approval.

use crate::websocket::{Step, WsConfirmRequest, WsConfirmResponse, WsOutgoingMessage};

/// A step the server has paused on.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    pub confirm_id: String,
    pub step_index: u64,
    pub step: Step,
}

impl From<WsConfirmRequest> for ConfirmationRequest {
    fn from(req: WsConfirmRequest) -> Self {
        Self {
            confirm_id: req.confirm_id,
            step_index: req.step_index,
            step: req.step,
        }
    }
}

impl ConfirmationRequest {
    /// Dialog headline, e.g. `Step 2: Click element #submit`.
    pub fn headline(&self) -> String {
        format!("Step {}: {}", self.step_index, describe_step(&self.step))
    }

    /// The step exactly as the server sent it, pretty-printed.
    pub fn raw_step(&self) -> String {
        serde_json::to_string_pretty(&self.step).unwrap_or_else(|_| self.step.action.clone())
    }
}

/// Human-readable description of a step.
pub fn describe_step(step: &Step) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
    match step.action.as_str() {
        "navigate" => format!("Navigate to {}", field(&step.url)),
        "click" => format!("Click element {}", field(&step.selector)),
        "type" => format!("Type text into {}", field(&step.selector)),
        other => other.to_string(),
    }
}

/// What the user chose in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
    /// Dialog dismissed with Esc; treated as a denial
    Cancel,
}

impl Decision {
    pub fn approved(&self) -> bool {
        matches!(self, Decision::Approve)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateError {
    /// A request is already waiting; carries the id of the rejected one
    AlreadyPending { rejected_id: String },
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateError::AlreadyPending { rejected_id } => write!(
                f,
                "Confirmation {} rejected: another step is awaiting a decision",
                rejected_id
            ),
        }
    }
}

impl std::error::Error for GateError {}

/// A decided request, ready to be answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub request: ConfirmationRequest,
    pub approved: bool,
}

impl Resolution {
    pub fn to_message(&self) -> WsOutgoingMessage {
        WsOutgoingMessage::ConfirmResponse(WsConfirmResponse::new(
            self.request.confirm_id.clone(),
            self.approved,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfirmationGate {
    #[default]
    Idle,
    Pending(ConfirmationRequest),
}

impl ConfirmationGate {
    /// Idle -> Pending. A second request while pending is refused and the
    /// first one stays.
    pub fn open(&mut self, request: ConfirmationRequest) -> Result<(), GateError> {
        match self {
            ConfirmationGate::Idle => {
                *self = ConfirmationGate::Pending(request);
                Ok(())
            }
            ConfirmationGate::Pending(_) => Err(GateError::AlreadyPending {
                rejected_id: request.confirm_id,
            }),
        }
    }

    /// Pending -> Idle. Returns `None` when there was nothing to decide.
    pub fn resolve(&mut self, decision: Decision) -> Option<Resolution> {
        match std::mem::take(self) {
            ConfirmationGate::Pending(request) => Some(Resolution {
                request,
                approved: decision.approved(),
            }),
            ConfirmationGate::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        match self {
            ConfirmationGate::Pending(request) => Some(request),
            ConfirmationGate::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }
}
