//! WebSocket transport for the automation server.
//!
//! `client` drives one socket from connect to close and reports lifecycle
//! events; reconnect policy lives in `app::connection`. `messages` defines the
//! JSON wire format.

pub mod client;
pub mod messages;

pub use client::{
    run_connection, run_connection_with_timeout, TransportEvent, WsClientConfig, WsError,
    DEFAULT_RECONNECT_DELAY_MS, HANDSHAKE_TIMEOUT,
};
pub use messages::{
    Step, WsConfirmRequest, WsConfirmResponse, WsConnected, WsIncomingMessage, WsLog,
    WsOutgoingMessage,
};
