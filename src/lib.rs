pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod websocket;
pub mod widgets;
