use serde::{Deserialize, Deserializer, Serialize};

use crate::state::LogLevel;

/// Message types the client knows how to route.
const KNOWN_TYPES: [&str; 3] = ["connected", "log", "confirm_request"];

/// Incoming WebSocket messages from the server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum WsIncomingMessage {
    /// Greeting sent by the server right after the socket opens
    #[serde(rename = "connected")]
    Connected(WsConnected),
    /// Progress line from the automation engine
    #[serde(rename = "log")]
    Log(WsLog),
    /// The engine is paused until the user approves or denies a step
    #[serde(rename = "confirm_request")]
    ConfirmRequest(WsConfirmRequest),
    /// Well-formed frame with a type this client does not handle (not deserialized from JSON)
    #[serde(skip)]
    Unrecognized { type_name: String },
    /// Frame that could not be parsed (not deserialized from JSON)
    #[serde(skip)]
    ParseError { error: String, raw: String },
}

impl WsIncomingMessage {
    /// Classify a raw text frame.
    ///
    /// Never fails: frames that are not JSON, lack a `type`, or carry a known
    /// `type` with invalid fields become [`WsIncomingMessage::ParseError`];
    /// frames with any other `type` become [`WsIncomingMessage::Unrecognized`].
    pub fn from_frame(text: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                return WsIncomingMessage::ParseError {
                    error: e.to_string(),
                    raw: text.to_string(),
                }
            }
        };

        let type_name = match value.get("type").and_then(|t| t.as_str()) {
            Some(t) => t.to_string(),
            None => {
                return WsIncomingMessage::ParseError {
                    error: "missing \"type\" field".to_string(),
                    raw: text.to_string(),
                }
            }
        };

        if !KNOWN_TYPES.contains(&type_name.as_str()) {
            return WsIncomingMessage::Unrecognized { type_name };
        }

        serde_json::from_value(value).unwrap_or_else(|e| WsIncomingMessage::ParseError {
            error: e.to_string(),
            raw: text.to_string(),
        })
    }
}

/// Connection greeting from the server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WsConnected {
    pub message: String,
}

/// Log line pushed by the server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WsLog {
    pub message: String,
    /// Missing, null or non-string levels read as info
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: LogLevel,
}

fn lenient_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(LogLevel::parse)
        .unwrap_or_default())
}

/// Approval request for one automation step
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WsConfirmRequest {
    /// Server-assigned correlation id, echoed back in the response
    pub confirm_id: String,
    /// Position of the step in the plan
    pub step_index: u64,
    /// The step awaiting approval
    pub step: Step,
}

/// One unit of automation.
///
/// Only `action` is required. Fields this client does not know about are kept
/// in `extra` so the raw step can be shown to the user unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Step {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Step {
    /// Create a step with only an action set.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            url: None,
            selector: None,
            text: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// User decision on a confirmation request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WsConfirmResponse {
    pub confirm_id: String,
    pub approved: bool,
}

impl WsConfirmResponse {
    pub fn new(confirm_id: impl Into<String>, approved: bool) -> Self {
        Self {
            confirm_id: confirm_id.into(),
            approved,
        }
    }
}

/// Outgoing WebSocket messages (sent to server)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum WsOutgoingMessage {
    #[serde(rename = "confirm_response")]
    ConfirmResponse(WsConfirmResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirm_request() {
        let json = r##"{
            "type": "confirm_request",
            "confirm_id": "abc",
            "step_index": 2,
            "step": {"action": "click", "selector": "#submit"}
        }"##;

        match WsIncomingMessage::from_frame(json) {
            WsIncomingMessage::ConfirmRequest(req) => {
                assert_eq!(req.confirm_id, "abc");
                assert_eq!(req.step_index, 2);
                assert_eq!(req.step.action, "click");
                assert_eq!(req.step.selector.as_deref(), Some("#submit"));
                assert!(req.step.url.is_none());
            }
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_log_with_level() {
        let json = r#"{"type": "log", "message": "Planning steps", "level": "success"}"#;
        match WsIncomingMessage::from_frame(json) {
            WsIncomingMessage::Log(log) => {
                assert_eq!(log.message, "Planning steps");
                assert_eq!(log.level, LogLevel::Success);
            }
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_log_without_level_defaults_to_info() {
        let json = r#"{"type": "log", "message": "hello"}"#;
        match WsIncomingMessage::from_frame(json) {
            WsIncomingMessage::Log(log) => assert_eq!(log.level, LogLevel::Info),
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_log_with_null_or_numeric_level() {
        for level in ["null", "3"] {
            let json = format!(
                r#"{{"type": "log", "message": "still shown", "level": {}}}"#,
                level
            );
            match WsIncomingMessage::from_frame(&json) {
                WsIncomingMessage::Log(log) => {
                    assert_eq!(log.message, "still shown");
                    assert_eq!(log.level, LogLevel::Info);
                }
                other => panic!("Expected Log for level {}, got {:?}", level, other),
            }
        }
    }

    #[test]
    fn test_parse_connected() {
        let json = r#"{"type": "connected", "message": "Welcome"}"#;
        assert_eq!(
            WsIncomingMessage::from_frame(json),
            WsIncomingMessage::Connected(WsConnected {
                message: "Welcome".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let json = r#"{"type": "heartbeat", "seq": 4}"#;
        assert_eq!(
            WsIncomingMessage::from_frame(json),
            WsIncomingMessage::Unrecognized {
                type_name: "heartbeat".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        match WsIncomingMessage::from_frame("not json {") {
            WsIncomingMessage::ParseError { raw, .. } => assert_eq!(raw, "not json {"),
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_parse_error() {
        assert!(matches!(
            WsIncomingMessage::from_frame(r#"{"message": "hi"}"#),
            WsIncomingMessage::ParseError { .. }
        ));
    }

    #[test]
    fn test_known_type_with_missing_fields_is_parse_error() {
        let json = r#"{"type": "confirm_request", "confirm_id": "x"}"#;
        assert!(matches!(
            WsIncomingMessage::from_frame(json),
            WsIncomingMessage::ParseError { .. }
        ));
    }

    #[test]
    fn test_step_keeps_unknown_fields() {
        let json = r#"{"action": "scroll", "amount": 300}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.action, "scroll");
        assert_eq!(step.extra.get("amount"), Some(&serde_json::json!(300)));

        let back = serde_json::to_value(&step).unwrap();
        assert_eq!(back["amount"], 300);
        assert!(back.get("url").is_none());
    }

    #[test]
    fn test_serialize_confirm_response() {
        let msg = WsOutgoingMessage::ConfirmResponse(WsConfirmResponse::new("abc", true));
        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();

        assert_eq!(parsed["type"], "confirm_response");
        assert_eq!(parsed["confirm_id"], "abc");
        assert_eq!(parsed["approved"], true);
        assert_eq!(parsed.as_object().unwrap().len(), 3);
    }
}
