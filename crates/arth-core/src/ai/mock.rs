//! Mock transport for testing
//!
//! Returns a configured raw response without touching the network and counts
//! how often it was invoked, so tests can assert that no call was made.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::types::{GenerateContentRequest, GenerateContentResponse, RawResponse};
use super::ProviderTransport;

/// Canned reply used by `MockTransport::new()`
pub const MOCK_REPLY: &str =
    "You are saving steadily. Consider a recurring deposit or an index fund SIP. This is not financial advice";

#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(RawResponse),
    Unreachable(String),
}

#[derive(Clone)]
pub struct MockTransport {
    outcome: MockOutcome,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Mock that answers with a canned successful reply
    pub fn new() -> Self {
        Self::replying(MOCK_REPLY)
    }

    /// Mock whose single candidate carries `text`
    pub fn replying(text: &str) -> Self {
        let body = serde_json::to_string(&GenerateContentResponse::with_text(text))
            .unwrap_or_else(|_| "{}".to_string());
        Self::with_body(200, &body)
    }

    /// Mock that answers with an arbitrary status and body
    pub fn with_body(status: u16, body: &str) -> Self {
        Self::from_outcome(MockOutcome::Respond(RawResponse {
            status,
            body: body.to_string(),
        }))
    }

    /// Mock that answers with a Gemini-style error object
    pub fn provider_error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({
            "error": { "code": status, "message": message, "status": "INVALID_ARGUMENT" }
        });
        Self::with_body(status, &body.to_string())
    }

    /// Mock whose connection always fails
    pub fn unreachable() -> Self {
        Self::from_outcome(MockOutcome::Unreachable(
            "connection refused".to_string(),
        ))
    }

    fn from_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of times `generate` was invoked (shared across clones)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt text of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl ProviderTransport for MockTransport {
    async fn generate(
        &self,
        _api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let prompt = request
            .contents
            .first()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone());
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = prompt;
        }

        match &self.outcome {
            MockOutcome::Respond(raw) => Ok(raw.clone()),
            MockOutcome::Unreachable(reason) => Err(Error::InvalidData(reason.clone())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
