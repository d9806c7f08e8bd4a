//! HTTP seam for the REST side of the automation server.
//!
//! The client makes two calls: `POST /api/task` with a JSON goal and
//! `GET /api/health`. Both go through [`HttpClient`] so tests can swap in
//! `MockHttpClient` or point the real adapter at a wiremock server.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A completed exchange. Any status the server answered with lands here,
/// including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Non-empty string `error` field of a JSON object body.
    pub fn error_field(&self) -> Option<String> {
        let body: serde_json::Value = self.json().ok()?;
        body.get("error")?
            .as_str()
            .filter(|e| !e.is_empty())
            .map(str::to_string)
    }
}

/// Failures before any status arrived.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response, HttpError>;

    /// POST `body` as `application/json`.
    async fn post_json(&self, url: &str, body: &str) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(300, Bytes::new()).is_success());
        assert!(!Response::new(503, Bytes::new()).is_success());
    }

    #[test]
    fn test_error_field() {
        let response = Response::new(503, r#"{"error":"Orchestrator not initialized"}"#);
        assert_eq!(
            response.error_field().as_deref(),
            Some("Orchestrator not initialized")
        );

        assert_eq!(Response::new(500, r#"{"error":""}"#).error_field(), None);
        assert_eq!(Response::new(500, r#"{"error":42}"#).error_field(), None);
        assert_eq!(Response::new(500, "<html>oops</html>").error_field(), None);
        assert_eq!(Response::new(500, r#"["error"]"#).error_field(), None);
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::Timeout("30s elapsed".to_string()).to_string(),
            "Request timeout: 30s elapsed"
        );
        assert_eq!(
            HttpError::InvalidUrl("relative URL without a base".to_string()).to_string(),
            "Invalid URL: relative URL without a base"
        );
    }
}
