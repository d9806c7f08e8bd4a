//! Error classification for stepgate.
//!
//! Concrete error types live next to the code that produces them
//! (`WsError`, `HttpError`, `SubmitError`, `GateError`, `ConfigError`); this
//! module maps each of them onto an [`ErrorCategory`] so handlers can decide
//! between reconnecting, logging and dropping, or telling the user.
//!
//! | Category | Handling |
//! |----------|----------|
//! | Transport | Reconnect after the fixed delay |
//! | Protocol | Log and drop the message |
//! | Validation | Warn or error in the log panel, nothing sent |
//! | Request | Error in the log panel |
//! | Configuration | Exit with a message before the UI starts |
//! | Terminal | Exit after restoring the terminal |

mod category;

pub use category::{Categorized, ErrorCategory};
