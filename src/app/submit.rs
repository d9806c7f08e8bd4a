//! Task submission and the health check, both plain HTTP calls run off the
//! dispatcher and reported back as [`AppMessage`]s.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::{Categorized, ErrorCategory};
use crate::traits::{HttpClient, Response};

use super::{App, AppMessage};

/// Why a submit action was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    EmptyGoal,
    NotConnected,
    InFlight,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::EmptyGoal => write!(f, "Please enter a task"),
            SubmitError::NotConnected => write!(f, "Not connected to server"),
            SubmitError::InFlight => write!(f, "A task is already being submitted"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl Categorized for SubmitError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

/// How a submission request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 2xx
    Accepted,
    /// Any other status; `error` comes from the body or is "Unknown error"
    Rejected { status: u16, error: String },
    /// The request never got an answer
    Failed(String),
}

impl SubmitOutcome {
    pub fn from_response(response: &Response) -> Self {
        if response.is_success() {
            return SubmitOutcome::Accepted;
        }
        SubmitOutcome::Rejected {
            status: response.status,
            error: response
                .error_field()
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }
}

/// `POST {url}` with `{"goal": goal}`.
pub async fn post_task(http: &dyn HttpClient, url: &str, goal: &str) -> SubmitOutcome {
    let body = serde_json::json!({ "goal": goal }).to_string();
    match http.post_json(url, &body).await {
        Ok(response) => SubmitOutcome::from_response(&response),
        Err(err) => {
            let category = err.category();
            warn!(
                category = %category,
                retryable = category.is_retryable(),
                "Task submission failed: {}",
                err
            );
            SubmitOutcome::Failed(err.to_string())
        }
    }
}

/// Sends exactly one `TaskSubmitted`, even if the submitting task is torn down
/// before it finishes.
struct SubmissionReport {
    tx: mpsc::UnboundedSender<AppMessage>,
    goal: Option<String>,
}

impl SubmissionReport {
    fn new(tx: mpsc::UnboundedSender<AppMessage>, goal: String) -> Self {
        Self {
            tx,
            goal: Some(goal),
        }
    }

    fn finish(mut self, outcome: SubmitOutcome) {
        if let Some(goal) = self.goal.take() {
            let _ = self.tx.send(AppMessage::TaskSubmitted { goal, outcome });
        }
    }
}

impl Drop for SubmissionReport {
    fn drop(&mut self) {
        if let Some(goal) = self.goal.take() {
            let _ = self.tx.send(AppMessage::TaskSubmitted {
                goal,
                outcome: SubmitOutcome::Failed("submission was interrupted".to_string()),
            });
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub mcp_running: bool,
    #[serde(default)]
    pub active_connections: u64,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "ok" && self.mcp_running
    }

    pub fn summary(&self) -> String {
        if self.status != "ok" {
            return format!("Server status: {}", self.status);
        }
        format!(
            "Server healthy: browser automation {}, {} active connection(s)",
            if self.mcp_running {
                "available"
            } else {
                "unavailable"
            },
            self.active_connections
        )
    }
}

/// `GET {url}` and decode the health body.
pub async fn fetch_health(http: &dyn HttpClient, url: &str) -> Result<HealthStatus, String> {
    let response = http.get(url).await.map_err(|e| e.to_string())?;
    if !response.is_success() {
        return Err(format!("HTTP {}", response.status));
    }
    response.json().map_err(|e| format!("invalid response: {}", e))
}

impl App {
    /// Validate the goal and start a submission.
    ///
    /// Validation failures are logged to the panel; an in-flight submission
    /// makes this a silent no-op.
    pub fn submit_task(&mut self) -> Result<(), SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        let goal = self.input.content().trim().to_string();
        if goal.is_empty() {
            self.log.warning(SubmitError::EmptyGoal.to_string());
            return Err(SubmitError::EmptyGoal);
        }
        if !self.is_connected() {
            self.log.error(SubmitError::NotConnected.to_string());
            return Err(SubmitError::NotConnected);
        }

        self.submitting = true;
        self.mark_dirty();
        info!("Submitting task: {}", goal);

        let http = Arc::clone(&self.http);
        let url = self.config.task_url();
        let report = SubmissionReport::new(self.message_tx.clone(), goal.clone());

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let outcome = post_task(http.as_ref(), &url, &goal).await;
                report.finish(outcome);
            });
        } else {
            error!("No tokio runtime, cannot submit task");
            report.finish(SubmitOutcome::Failed("no async runtime available".to_string()));
        }
        Ok(())
    }

    /// A submission finished; re-enable the control and report the result.
    pub fn handle_task_submitted(&mut self, goal: String, outcome: SubmitOutcome) {
        self.submitting = false;
        match outcome {
            SubmitOutcome::Accepted => {
                self.log.success(format!("Task submitted: {}", goal));
            }
            SubmitOutcome::Rejected { status, error } => {
                warn!(
                    category = %ErrorCategory::Request,
                    "Task rejected with HTTP {}: {}", status, error
                );
                self.log.error(format!("Submission failed: {}", error));
            }
            SubmitOutcome::Failed(error) => {
                self.log.error(format!("Submission failed: {}", error));
            }
        }
    }

    /// Ask the server for its health in the background.
    pub fn check_health(&self) {
        let http = Arc::clone(&self.http);
        let url = self.config.health_url();
        let tx = self.message_tx.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let result = fetch_health(http.as_ref(), &url).await;
                let _ = tx.send(AppMessage::HealthChecked(result));
            });
        }
    }

    pub fn handle_health_checked(&mut self, result: Result<HealthStatus, String>) {
        match result {
            Ok(health) if health.is_healthy() => self.log.info(health.summary()),
            Ok(health) => self.log.warning(health.summary()),
            Err(err) => {
                warn!("Health check failed: {}", err);
                self.log.warning(format!("Health check failed: {}", err));
            }
        }
    }
}
