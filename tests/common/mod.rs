//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let mut t = TestAppBuilder::new().connected().build();
//! t.connector.inject_frame(r#"{"type":"log","message":"hi"}"#);
//! t.app.drain_messages();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use ratatui::buffer::Buffer;
pub use stepgate::adapters::mock::{MockConnector, MockHttpClient};
use stepgate::app::App;
use stepgate::config::ClientConfig;
use stepgate::websocket::TransportEvent;

/// An app plus handles on its test doubles.
pub struct TestApp {
    pub app: App,
    pub connector: MockConnector,
    pub http: MockHttpClient,
}

/// Builder for test App instances.
pub struct TestAppBuilder {
    config: ClientConfig,
    http: MockHttpClient,
    connected: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig::default().with_server("test.local:8000"),
            http: MockHttpClient::new(),
            connected: false,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_http(mut self, http: MockHttpClient) -> Self {
        self.http = http;
        self
    }

    /// Deliver `Opened` on the first connection before returning.
    pub fn connected(mut self) -> Self {
        self.connected = true;
        self
    }

    /// Builds the app and opens its first connection (without the health
    /// check that `App::start` also runs).
    pub fn build(self) -> TestApp {
        let connector = MockConnector::new();
        let mut app = App::with_adapters(
            self.config,
            Arc::new(self.http.clone()),
            Arc::new(connector.clone()),
        );
        app.connection.connect();

        if self.connected {
            connector.emit(TransportEvent::Opened);
            app.drain_messages();
        }

        TestApp {
            app,
            connector,
            http: self.http,
        }
    }
}

/// Handle queued messages until `done` holds, waiting up to two seconds.
pub async fn pump_until<F>(app: &mut App, mut done: F)
where
    F: FnMut(&App) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !done(app) {
        let rx = app.message_rx.as_mut().expect("receiver owned by app");
        let msg = tokio::time::timeout_at(deadline, rx.recv())
            .await
            .expect("timed out waiting for app message")
            .expect("message channel closed");
        app.handle_message(msg);
    }
}

/// Type `text` into the input box.
pub fn type_goal(app: &mut App, text: &str) {
    app.input.set_content(text);
}

/// Every row of the buffer as a string.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

/// Top-left cell of the first occurrence of `needle`.
pub fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    buffer_lines(buffer)
        .iter()
        .enumerate()
        .find_map(|(y, line)| {
            line.find(needle).map(|byte_idx| {
                let x = line[..byte_idx].chars().count();
                (buffer.area.x + x as u16, buffer.area.y + y as u16)
            })
        })
}
