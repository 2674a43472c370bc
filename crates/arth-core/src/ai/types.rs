//! Advisory pipeline types
//!
//! Gemini wire types are deliberately permissive (every field defaults) so the
//! normalizer, not serde, decides what a structurally empty reply means.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a `generateContent` call
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Successful `generateContent` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if non-empty
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Convenience constructor for a one-candidate reply
    pub fn with_text(text: &str) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: Some(text.to_string()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }
}

/// Raw HTTP answer from the provider, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of one provider dispatch
///
/// Callers must handle every variant; there are no optional fields to probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult {
    /// Well-formed JSON without an `error` field
    Succeeded(GenerateContentResponse),
    /// The provider answered and explicitly rejected the request
    ProviderError { status: u16, message: Option<String> },
    /// The call never reached the model or the answer was unreadable
    TransportError(String),
    /// No credential; nothing was sent
    ConfigurationError,
}

impl ProviderResult {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Succeeded(_) => None,
            Self::ProviderError { .. } => Some(ErrorKind::ProviderError),
            Self::TransportError(_) => Some(ErrorKind::TransportError),
            Self::ConfigurationError => Some(ErrorKind::ConfigurationError),
        }
    }
}

/// Failure taxonomy of the advisory pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ConfigurationError,
    ProviderError,
    TransportError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::ConfigurationError => "configuration_error",
            Self::ProviderError => "provider_error",
            Self::TransportError => "transport_error",
        }
    }

    /// Fixed user-facing message for this kind
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Question is required",
            Self::ConfigurationError => "AI service is not configured on the server",
            Self::ProviderError => "AI service failed",
            Self::TransportError => "AI server error, try again later",
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable reply contract returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryReply {
    pub text: String,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<ErrorKind>,
}

impl AdvisoryReply {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
            failure_kind: None,
        }
    }

    pub fn failure(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: false,
            failure_kind: Some(kind),
        }
    }
}
