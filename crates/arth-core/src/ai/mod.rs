//! Provider gateway
//!
//! Sends a composed prompt to the generative-text provider and classifies the
//! answer into a [`ProviderResult`]. Nothing here ever panics or returns an
//! `Err` to the caller: every failure becomes a `ProviderResult` variant, and
//! [`normalize`] turns that into the user-facing reply.
//!
//! # Architecture
//!
//! - `ProviderTransport` trait: moves one request to the provider and returns
//!   the raw status and body
//! - `ProviderClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - `Credential`: where the API key comes from, resolved on every dispatch
//! - `AdvisoryGateway`: credential check, dispatch, classification
//!
//! # Configuration
//!
//! Environment variables:
//! - `ARTH_PROVIDER`: Client to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (secret, read at dispatch time)
//! - `GEMINI_HOST` / `GEMINI_MODEL`: see [`crate::config`]

mod gemini;
mod mock;
mod reply;
pub mod types;

pub use gemini::GeminiTransport;
pub use mock::{MockTransport, MOCK_REPLY};
pub use reply::{failure, normalize, FALLBACK_REPLY};
pub use types::*;

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{ProviderConfig, API_KEY_ENV, PROVIDER_ENV};
use crate::error::Result;

/// Trait implemented by every provider transport
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// Send one request; `Err` only when no HTTP answer was obtained
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<RawResponse>;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete provider client enum
#[derive(Clone)]
pub enum ProviderClient {
    /// Gemini `generateContent` over HTTPS
    Gemini(GeminiTransport),
    /// Mock transport for testing
    Mock(MockTransport),
}

impl ProviderClient {
    /// Create a client from `ARTH_PROVIDER`
    ///
    /// Unknown values fall back to gemini with a warning.
    pub fn from_env(config: &ProviderConfig) -> Self {
        let provider = std::env::var(PROVIDER_ENV).unwrap_or_else(|_| "gemini".to_string());

        match provider.trim().to_lowercase().as_str() {
            "" | "gemini" => ProviderClient::Gemini(GeminiTransport::from_config(config)),
            "mock" => ProviderClient::Mock(MockTransport::new()),
            _ => {
                warn!(provider = %provider, "Unknown ARTH_PROVIDER, falling back to gemini");
                ProviderClient::Gemini(GeminiTransport::from_config(config))
            }
        }
    }

    /// Create a Gemini client directly
    pub fn gemini(host: &str, model: &str) -> Self {
        ProviderClient::Gemini(GeminiTransport::new(host, model))
    }

    /// Create a mock client with the canned reply
    pub fn mock() -> Self {
        ProviderClient::Mock(MockTransport::new())
    }

    fn inner(&self) -> &dyn ProviderTransport {
        match self {
            ProviderClient::Gemini(t) => t,
            ProviderClient::Mock(t) => t,
        }
    }

    /// Backend name for display
    pub fn backend_name(&self) -> &'static str {
        match self {
            ProviderClient::Gemini(_) => "gemini",
            ProviderClient::Mock(_) => "mock",
        }
    }
}

#[async_trait]
impl ProviderTransport for ProviderClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<RawResponse> {
        self.inner().generate(api_key, request).await
    }

    fn model(&self) -> &str {
        self.inner().model()
    }

    fn host(&self) -> &str {
        self.inner().host()
    }
}

/// Source of the provider API key
#[derive(Clone)]
pub enum Credential {
    /// Read from this environment variable on every dispatch
    Env(String),
    /// Fixed value, for tests and embedding
    Fixed(Option<String>),
}

impl Credential {
    /// Credential read from `GEMINI_API_KEY`
    pub fn from_env() -> Self {
        Credential::Env(API_KEY_ENV.to_string())
    }

    pub fn fixed(key: &str) -> Self {
        Credential::Fixed(Some(key.to_string()))
    }

    pub fn missing() -> Self {
        Credential::Fixed(None)
    }

    /// Current key, if present and non-blank
    pub fn resolve(&self) -> Option<String> {
        let raw = match self {
            Credential::Env(name) => std::env::var(name).ok(),
            Credential::Fixed(value) => value.clone(),
        };
        raw.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_some()
    }
}

// Never print the key itself
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Env(name) => write!(f, "Credential::Env({})", name),
            Credential::Fixed(Some(_)) => write!(f, "Credential::Fixed(<redacted>)"),
            Credential::Fixed(None) => write!(f, "Credential::Fixed(None)"),
        }
    }
}

/// Performs one authenticated provider call per prompt
#[derive(Clone)]
pub struct AdvisoryGateway {
    client: ProviderClient,
    credential: Credential,
}

impl AdvisoryGateway {
    pub fn new(client: ProviderClient, credential: Credential) -> Self {
        Self { client, credential }
    }

    /// Gateway configured from the environment and the provider config file
    pub fn from_env(config: &ProviderConfig) -> Self {
        Self::new(ProviderClient::from_env(config), Credential::from_env())
    }

    pub fn client(&self) -> &ProviderClient {
        &self.client
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Send a composed prompt and classify the outcome
    ///
    /// Without a credential no request is made. Exactly one request otherwise;
    /// there are no retries.
    pub async fn dispatch(&self, prompt: &str) -> ProviderResult {
        let Some(api_key) = self.credential.resolve() else {
            warn!("Provider API key is not configured, skipping dispatch");
            return ProviderResult::ConfigurationError;
        };

        debug!(
            backend = self.client.backend_name(),
            model = self.client.model(),
            prompt_len = prompt.len(),
            "Dispatching advisory prompt"
        );

        let request = GenerateContentRequest::from_prompt(prompt);
        match self.client.generate(&api_key, &request).await {
            Ok(raw) => classify(raw),
            Err(e) => {
                warn!(host = self.client.host(), error = %e, "Provider request failed");
                ProviderResult::TransportError(e.to_string())
            }
        }
    }
}

/// Classify a raw provider answer
///
/// A truthy `error` field wins over the HTTP status; `null`, `false`, `0` and
/// `""` count as no error. A non-JSON body is a transport failure even on 200.
pub fn classify(raw: RawResponse) -> ProviderResult {
    let value: serde_json::Value = match serde_json::from_str(&raw.body) {
        Ok(v) => v,
        Err(e) => {
            warn!(status = raw.status, error = %e, "Provider returned a non-JSON body");
            return ProviderResult::TransportError(format!(
                "unreadable provider response (status {})",
                raw.status
            ));
        }
    };

    if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
        let message = match error {
            serde_json::Value::String(s) => Some(s.clone()),
            other => other
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from),
        };
        warn!(status = raw.status, "Provider rejected the request");
        return ProviderResult::ProviderError {
            status: raw.status,
            message,
        };
    }

    if !raw.is_success() {
        warn!(status = raw.status, "Provider returned an error status");
        return ProviderResult::ProviderError {
            status: raw.status,
            message: None,
        };
    }

    ProviderResult::Succeeded(serde_json::from_value(value).unwrap_or_default())
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockGeminiServer;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    fn gateway(mock: &MockTransport, credential: Credential) -> AdvisoryGateway {
        AdvisoryGateway::new(ProviderClient::Mock(mock.clone()), credential)
    }

    #[test]
    fn test_classify_success() {
        let result = classify(raw(
            200,
            r#"{"candidates": [{"content": {"parts": [{"text": "Try an FD"}]}}]}"#,
        ));
        match result {
            ProviderResult::Succeeded(response) => {
                assert_eq!(response.first_text(), Some("Try an FD"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_error_field_wins_over_status() {
        let result = classify(raw(200, r#"{"error": {"message": "quota exceeded"}}"#));
        assert_eq!(
            result,
            ProviderResult::ProviderError {
                status: 200,
                message: Some("quota exceeded".into())
            }
        );

        let result = classify(raw(400, r#"{"error": "bad key"}"#));
        assert_eq!(
            result,
            ProviderResult::ProviderError {
                status: 400,
                message: Some("bad key".into())
            }
        );
    }

    #[test]
    fn test_classify_falsy_error_field_is_ignored() {
        for body in [
            r#"{"error": "", "candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
            r#"{"error": false, "candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
            r#"{"error": null, "candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
            r#"{"error": 0, "candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
        ] {
            match classify(raw(200, body)) {
                ProviderResult::Succeeded(response) => {
                    assert_eq!(response.first_text(), Some("ok"), "body: {}", body)
                }
                other => panic!("unexpected {:?} for {}", other, body),
            }
        }

        // Falsy error on a failing status still falls through to the status check
        assert_eq!(
            classify(raw(500, r#"{"error": false}"#)),
            ProviderResult::ProviderError {
                status: 500,
                message: None
            }
        );
    }

    #[test]
    fn test_classify_error_status_without_error_field() {
        assert_eq!(
            classify(raw(503, r#"{"candidates": []}"#)),
            ProviderResult::ProviderError {
                status: 503,
                message: None
            }
        );
    }

    #[test]
    fn test_classify_non_json_is_transport_error() {
        assert!(matches!(
            classify(raw(502, "<html>Bad Gateway</html>")),
            ProviderResult::TransportError(_)
        ));
        assert!(matches!(
            classify(raw(200, "")),
            ProviderResult::TransportError(_)
        ));
    }

    #[test]
    fn test_classify_odd_shape_is_empty_success() {
        let result = classify(raw(200, r#"{"candidates": "nope"}"#));
        assert_eq!(
            result,
            ProviderResult::Succeeded(GenerateContentResponse::default())
        );
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_call() {
        let mock = MockTransport::new();
        let result = gateway(&mock, Credential::missing()).dispatch("prompt").await;

        assert_eq!(result, ProviderResult::ConfigurationError);
        assert_eq!(mock.calls(), 0);

        let blank = gateway(&mock, Credential::Fixed(Some("   ".into())))
            .dispatch("prompt")
            .await;
        assert_eq!(blank, ProviderResult::ConfigurationError);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_sends_prompt_once() {
        let mock = MockTransport::replying("Invest in index funds");
        let result = gateway(&mock, Credential::fixed("k"))
            .dispatch("my prompt")
            .await;

        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_prompt().as_deref(), Some("my prompt"));
        assert!(matches!(result, ProviderResult::Succeeded(_)));
    }

    #[tokio::test]
    async fn test_dispatch_unreachable_is_transport_error() {
        let mock = MockTransport::unreachable();
        let result = gateway(&mock, Credential::fixed("k")).dispatch("p").await;

        assert!(matches!(result, ProviderResult::TransportError(_)));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_provider_error() {
        let mock = MockTransport::provider_error(400, "API key not valid");
        let result = gateway(&mock, Credential::fixed("k")).dispatch("p").await;

        assert_eq!(result.kind(), Some(ErrorKind::ProviderError));
    }

    #[tokio::test]
    async fn test_gemini_dispatch_end_to_end() {
        let server = MockGeminiServer::start_with(
            400,
            r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key."}}"#,
        )
        .await;
        let gateway = AdvisoryGateway::new(
            ProviderClient::gemini(&server.url(), "gemini-1.5-flash"),
            Credential::fixed("bad-key"),
        );

        let reply = normalize(gateway.dispatch("prompt").await);

        assert_eq!(
            reply.text,
            "AI service failed: API key not valid. Please pass a valid API key."
        );
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let debug = format!("{:?}", Credential::fixed("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}
