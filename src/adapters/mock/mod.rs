//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling unit testing without a running server.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockConnector`] - WebSocket connector with event injection

pub mod http;
pub mod websocket;

pub use http::{Method, MockHttpClient, MockResponse, RecordedRequest};
pub use websocket::MockConnector;
