//! AppMessage enum for async communication within the application.

use crate::websocket::TransportEvent;

use super::submit::{HealthStatus, SubmitOutcome};

/// Everything that reaches the dispatcher from background tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Lifecycle event or frame from the connection tagged `generation`
    Transport {
        generation: u64,
        event: TransportEvent,
    },
    /// The reconnect delay scheduled after `generation` closed has elapsed
    ReconnectDue { generation: u64 },
    /// A task submission finished, one way or another
    TaskSubmitted { goal: String, outcome: SubmitOutcome },
    /// Result of the startup health check
    HealthChecked(Result<HealthStatus, String>),
}
