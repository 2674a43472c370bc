//! Arth Core Library
//!
//! Shared functionality for the Arth personal finance advisor:
//! - Ledger reduction into income/expense totals and category breakdowns
//! - Financial summary building (savings, budget usage)
//! - Dashboard insights as a first-match rule chain
//! - Advisory prompt composition
//! - Gemini advisory gateway with a typed provider result
//! - Reply normalization into a stable response contract
//! - Ledger store interface (JSON files, in-memory)

pub mod advisor;
pub mod ai;
pub mod config;
pub mod error;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod prompts;
pub mod store;
pub mod summary;

/// Test utilities including mock Gemini server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{Advisor, ChatSession};
pub use ai::{
    normalize, AdvisoryGateway, AdvisoryReply, Credential, ErrorKind, GeminiTransport,
    MockTransport, ProviderClient, ProviderResult, ProviderTransport,
};
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use insights::{Insight, InsightEngine, InsightKind};
pub use ledger::{reduce, CategoryTotal, LedgerTotals};
pub use models::{
    AdvisoryRequest, ChatMessage, ChatRole, LedgerEntry, LedgerSnapshot, PaymentStatus,
    UpcomingPayment,
};
pub use prompts::compose;
pub use store::{InMemoryLedgerStore, JsonLedgerStore, LedgerStore};
pub use summary::{aggregate, build, AnalyticsView, DashboardView, FinancialSummary};
