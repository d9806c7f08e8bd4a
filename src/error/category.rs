//! Error category classification.
//!
//! Every failure the client can observe falls into one of these buckets,
//! which decides whether it is recovered automatically and how it is logged.

use std::fmt;

use crate::config::ConfigError;
use crate::state::GateError;
use crate::traits::HttpError;
use crate::websocket::WsError;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Socket closed, connect refused, HTTP transport failure.
    /// Recovered by reconnecting.
    Transport,

    /// Server sent something this client cannot interpret.
    /// Logged and dropped.
    Protocol,

    /// Rejected locally before anything was sent (empty goal, offline).
    Validation,

    /// The server answered a request with an error.
    Request,

    /// Bad flags or environment values.
    Configuration,

    /// Could not set up or restore the terminal.
    Terminal,
}

impl ErrorCategory {
    /// Whether the client retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Transport)
    }

    /// Short label for structured logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Request => "request",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Terminal => "terminal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "Connection problem",
            ErrorCategory::Protocol => "Unexpected message from server",
            ErrorCategory::Validation => "Input rejected",
            ErrorCategory::Request => "Server rejected the request",
            ErrorCategory::Configuration => "Configuration problem",
            ErrorCategory::Terminal => "Terminal error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that know their own category.
pub trait Categorized {
    fn category(&self) -> ErrorCategory;
}

impl Categorized for WsError {
    fn category(&self) -> ErrorCategory {
        match self {
            WsError::ParseError(_) => ErrorCategory::Protocol,
            WsError::ConnectionFailed(_) | WsError::Disconnected | WsError::SendFailed(_) => {
                ErrorCategory::Transport
            }
        }
    }
}

impl Categorized for HttpError {
    fn category(&self) -> ErrorCategory {
        match self {
            HttpError::InvalidUrl(_) => ErrorCategory::Configuration,
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Other(_) => {
                ErrorCategory::Transport
            }
        }
    }
}

impl Categorized for GateError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Protocol
    }
}

impl Categorized for ConfigError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}
