//! Advisory pipeline
//!
//! `question + summary -> prompt -> provider -> normalized reply`. Each call is
//! independent; the only state is the optional transcript in [`ChatSession`].

use tracing::{info, warn};

use crate::ai::{self, AdvisoryGateway, AdvisoryReply, ErrorKind};
use crate::config::ProviderConfig;
use crate::models::{AdvisoryRequest, ChatMessage};
use crate::prompts;
use crate::summary::FinancialSummary;

/// Answers financial questions through the provider gateway
#[derive(Clone)]
pub struct Advisor {
    gateway: AdvisoryGateway,
}

impl Advisor {
    pub fn new(gateway: AdvisoryGateway) -> Self {
        Self { gateway }
    }

    /// Advisor wired from `ARTH_PROVIDER` / `GEMINI_*` and the provider config
    pub fn from_env(config: &ProviderConfig) -> Self {
        Self::new(AdvisoryGateway::from_env(config))
    }

    pub fn gateway(&self) -> &AdvisoryGateway {
        &self.gateway
    }

    /// Answer one question
    ///
    /// Always returns a reply. A blank question yields an `InvalidInput`
    /// failure without contacting the provider.
    pub async fn advise(
        &self,
        question: Option<&str>,
        summary: Option<FinancialSummary>,
    ) -> AdvisoryReply {
        let request = match AdvisoryRequest::new(question, summary) {
            Ok(request) => request,
            Err(_) => return ai::failure(ErrorKind::InvalidInput),
        };

        let prompt = match prompts::compose_request(&request) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, "Failed to compose advisory prompt");
                return ai::failure(ErrorKind::InvalidInput);
            }
        };

        let result = self.gateway.dispatch(&prompt).await;
        let reply = ai::normalize(result);

        match reply.failure_kind {
            None => info!(reply_len = reply.text.len(), "Advisory reply generated"),
            Some(kind) => warn!(kind = %kind, "Advisory request failed"),
        }

        reply
    }
}

/// An interactive conversation against a fixed summary
///
/// Questions go out one at a time (`ask` takes `&mut self`) and the
/// transcript lives only as long as the session.
pub struct ChatSession {
    advisor: Advisor,
    summary: FinancialSummary,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(advisor: Advisor, summary: FinancialSummary) -> Self {
        Self {
            advisor,
            summary,
            transcript: Vec::new(),
        }
    }

    /// Ask a question and record both sides of the exchange
    ///
    /// Blank input is rejected and not recorded.
    pub async fn ask(&mut self, question: &str) -> AdvisoryReply {
        let reply = self
            .advisor
            .advise(Some(question), Some(self.summary.clone()))
            .await;

        if reply.failure_kind != Some(ErrorKind::InvalidInput) {
            self.transcript.push(ChatMessage::user(question.trim()));
            self.transcript.push(ChatMessage::ai(reply.text.clone()));
        }

        reply
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn summary(&self) -> &FinancialSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Credential, MockTransport, ProviderClient};
    use crate::models::ChatRole;
    use crate::summary::build;

    fn advisor(mock: &MockTransport, credential: Credential) -> Advisor {
        Advisor::new(AdvisoryGateway::new(
            ProviderClient::Mock(mock.clone()),
            credential,
        ))
    }

    #[tokio::test]
    async fn test_blank_question_is_invalid_input() {
        let mock = MockTransport::new();
        let advisor = advisor(&mock, Credential::fixed("k"));

        for question in [None, Some(""), Some("   ")] {
            let reply = advisor.advise(question, None).await;
            assert!(!reply.succeeded);
            assert_eq!(reply.failure_kind, Some(ErrorKind::InvalidInput));
            assert_eq!(reply.text, "Question is required");
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let mock = MockTransport::new();
        let reply = advisor(&mock, Credential::missing())
            .advise(Some("Where should I invest?"), None)
            .await;

        assert_eq!(reply.failure_kind, Some(ErrorKind::ConfigurationError));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_prompt_carries_summary() {
        let mock = MockTransport::replying("Put ₹5,000 into a SIP.");
        let reply = advisor(&mock, Credential::fixed("k"))
            .advise(Some("How much can I save?"), Some(build(50000.0, 20000.0, 30000.0)))
            .await;

        assert!(reply.succeeded);
        assert_eq!(reply.text, "Put ₹5,000 into a SIP.");

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("₹30,000.00"));
        assert!(prompt.contains("\"How much can I save?\""));
    }

    #[tokio::test]
    async fn test_chat_session_transcript() {
        let mock = MockTransport::replying("Start with an FD.");
        let mut session = ChatSession::new(
            advisor(&mock, Credential::fixed("k")),
            build(1000.0, 500.0, 800.0),
        );

        session.ask("  ").await;
        assert!(session.transcript().is_empty());

        session.ask("Is an FD safe?").await;
        session.ask("And gold?").await;

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[0], ChatMessage::user("Is an FD safe?"));
        assert_eq!(transcript[1].role, ChatRole::Ai);
        assert_eq!(transcript[1].text, "Start with an FD.");
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_chat_session_records_failures() {
        let mock = MockTransport::unreachable();
        let mut session = ChatSession::new(
            advisor(&mock, Credential::fixed("k")),
            FinancialSummary::default(),
        );

        let reply = session.ask("Hello?").await;

        assert_eq!(reply.failure_kind, Some(ErrorKind::TransportError));
        assert_eq!(session.transcript()[1].text, "AI server error, try again later");
    }
}
