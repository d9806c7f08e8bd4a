//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (task submission, health check)
//! - [`WebSocketConnector`] - Opening WebSocket connections

pub mod http;
pub mod websocket;

pub use http::{HttpClient, HttpError, Response};
pub use websocket::WebSocketConnector;
