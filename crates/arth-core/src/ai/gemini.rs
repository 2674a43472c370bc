//! Gemini transport
//!
//! HTTP client for the Gemini `generateContent` API. The transport only moves
//! bytes: it returns the status and raw body, and leaves classification of the
//! answer to the gateway.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;

use super::types::{GenerateContentRequest, RawResponse};
use super::ProviderTransport;

/// Header carrying the API key (kept out of the URL so it never shows up in logs)
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiTransport {
    http_client: Client,
    base_url: String,
    model: String,
}

impl GeminiTransport {
    /// Create a new Gemini transport
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.host, &config.model)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ProviderTransport for GeminiTransport {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<RawResponse> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_len = body.len(), "Gemini response received");

        Ok(RawResponse { status, body })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
