//! Scripted [`HttpClient`] for tests.
//!
//! Answers are looked up by URL: an exact match first, then the longest
//! configured prefix, then the fallback. Every call is recorded.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One call seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    /// JSON body of a POST
    pub body: Option<String>,
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Any status, including errors the server reports itself
    Success(Response),
    /// The request fails before a status arrives
    Error(HttpError),
}

#[derive(Debug, Default)]
struct Script {
    by_url: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    seen: Vec<RecordedRequest>,
}

impl Script {
    fn answer_for(&self, url: &str) -> Option<MockResponse> {
        if let Some(answer) = self.by_url.get(url) {
            return Some(answer.clone());
        }
        self.by_url
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, answer)| answer.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer requests for `url` (or anything starting with it).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.script().by_url.insert(url.to_string(), response);
    }

    /// Answer for URLs nothing else matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.script().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.script().seen.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script().seen.len()
    }

    fn call(&self, method: Method, url: &str, body: Option<&str>) -> Result<Response, HttpError> {
        let mut script = self.script();
        script.seen.push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.map(str::to_string),
        });

        match script.answer_for(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("no scripted answer for {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.call(Method::Get, url, None)
    }

    async fn post_json(&self, url: &str, body: &str) -> Result<Response, HttpError> {
        self.call(Method::Post, url, Some(body))
    }
}
