//! Client state containers
//!
//! - [`LogPanel`]: append-only log of server and client events
//! - [`ConfirmationGate`]: the single step awaiting approval, if any

pub mod confirmation;
pub mod log;

pub use confirmation::{
    describe_step, ConfirmationGate, ConfirmationRequest, Decision, GateError, Resolution,
};
pub use log::{sanitize_for_display, LogEntry, LogLevel, LogPanel};
