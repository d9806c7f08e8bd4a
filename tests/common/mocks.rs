//! Mock configurations for test fixtures.

pub use stepgate::adapters::mock::{Method, MockConnector, MockHttpClient, MockResponse};
pub use stepgate::traits::{HttpClient, HttpError, Response};

pub const TASK_URL: &str = "http://test.local:8000/api/task";
pub const HEALTH_URL: &str = "http://test.local:8000/api/health";

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Answer `url` with `status` and a JSON body.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, json.to_string())),
        );
        self
    }

    /// Fail requests to `url` before any response arrives.
    pub fn with_transport_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Server accepting every task.
pub fn accepting_server() -> MockHttpClient {
    MockHttpConfig::new()
        .with_json_response(
            TASK_URL,
            200,
            r#"{"status":"Task submitted","goal":"ignored"}"#,
        )
        .build()
}

/// Server whose orchestrator is not up.
pub fn unavailable_server() -> MockHttpClient {
    MockHttpConfig::new()
        .with_json_response(TASK_URL, 503, r#"{"error":"Orchestrator not initialized"}"#)
        .build()
}

/// A frame asking to approve a click on `selector`.
pub fn confirm_frame(confirm_id: &str, step_index: u64, selector: &str) -> String {
    serde_json::json!({
        "type": "confirm_request",
        "confirm_id": confirm_id,
        "step_index": step_index,
        "step": {"action": "click", "selector": selector}
    })
    .to_string()
}
