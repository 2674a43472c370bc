//! Reply Normalizer
//!
//! Turns any `ProviderResult` into an `AdvisoryReply`. Raw provider payloads
//! never reach the user; at most a short provider message is appended to the
//! fixed per-kind text.

use super::types::{AdvisoryReply, ErrorKind, ProviderResult};

/// Reply text when the provider succeeded but produced nothing usable
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Longest provider message shown to users
const MAX_PROVIDER_MESSAGE_LEN: usize = 200;

/// Normalize a provider result into the reply contract
pub fn normalize(result: ProviderResult) -> AdvisoryReply {
    match result {
        ProviderResult::Succeeded(response) => match response.first_text() {
            Some(text) => AdvisoryReply::success(text),
            None => {
                tracing::debug!("Provider returned no usable candidate, using fallback reply");
                AdvisoryReply::success(FALLBACK_REPLY)
            }
        },
        ProviderResult::ProviderError { message, .. } => {
            let base = ErrorKind::ProviderError.user_message();
            let text = match message.as_deref().and_then(displayable) {
                Some(detail) => format!("{}: {}", base, detail),
                None => base.to_string(),
            };
            AdvisoryReply::failure(ErrorKind::ProviderError, text)
        }
        ProviderResult::TransportError(_) => failure(ErrorKind::TransportError),
        ProviderResult::ConfigurationError => failure(ErrorKind::ConfigurationError),
    }
}

/// Reply for a failure kind using its fixed message
pub fn failure(kind: ErrorKind) -> AdvisoryReply {
    AdvisoryReply::failure(kind, kind.user_message())
}

/// A provider message is shown only when short, single-line, and non-empty
fn displayable(message: &str) -> Option<&str> {
    let message = message.trim();
    let ok = !message.is_empty()
        && message.chars().count() <= MAX_PROVIDER_MESSAGE_LEN
        && !message.contains(['\n', '\r', '{', '<']);
    ok.then_some(message)
}
