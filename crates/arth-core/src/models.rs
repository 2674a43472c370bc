//! Domain models for Arth
//!
//! Ledger records are owned by the external ledger store; the core only reads
//! snapshots of them. Amounts and dates deserialize leniently: a missing or
//! non-numeric amount becomes `None` (folded as zero by the reducer) instead of
//! failing the whole snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::summary::FinancialSummary;

/// One recorded income or expense
///
/// Incomes carry a `source`, expenses a `category`; both land in
/// `category_or_source`. Expense descriptions are accepted as the note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(default, rename = "category", alias = "source")]
    pub category_or_source: Option<String>,
    #[serde(default, rename = "date", deserialize_with = "lenient_date")]
    pub occurred_on: Option<NaiveDate>,
    #[serde(default, alias = "description")]
    pub note: Option<String>,
}

impl LedgerEntry {
    pub fn new(amount: f64, category_or_source: &str, occurred_on: NaiveDate) -> Self {
        Self {
            amount: Some(amount),
            category_or_source: Some(category_or_source.to_string()),
            occurred_on: Some(occurred_on),
            note: None,
        }
    }

    /// Category label, or `None` when absent or blank
    pub fn label(&self) -> Option<&str> {
        self.category_or_source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Status of a scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bill or payment scheduled for a future date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    /// Also read from a boolean `isPaid`
    #[serde(default, alias = "isPaid", deserialize_with = "lenient_status")]
    pub status: PaymentStatus,
}

/// Read-only view of one user's ledger, taken once per aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Monthly budget ceiling from the user's profile
    #[serde(default, deserialize_with = "lenient_amount_or_zero")]
    pub budget: f64,
    #[serde(default)]
    pub incomes: Vec<LedgerEntry>,
    #[serde(default)]
    pub expenses: Vec<LedgerEntry>,
    #[serde(default)]
    pub upcoming_payments: Vec<UpcomingPayment>,
}

/// A user question plus the summary it should be answered against
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRequest {
    pub question: String,
    pub summary: FinancialSummary,
}

impl AdvisoryRequest {
    /// Build a request, zero-filling a missing summary
    ///
    /// Fails with `InvalidInput` when the question is absent or blank.
    pub fn new(question: Option<&str>, summary: Option<FinancialSummary>) -> Result<Self> {
        let question = question
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| Error::InvalidInput("Question is required".into()))?;

        Ok(Self {
            question: question.to_string(),
            summary: summary.unwrap_or_default(),
        })
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

/// One entry in a chat transcript (kept in memory only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            text: text.into(),
        }
    }
}

/// Accept any JSON number; anything else (missing, null, string, NaN) is `None`
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|n| n.is_finite()))
}

pub(crate) fn lenient_amount_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?.unwrap_or(0.0))
}

/// Accept `"pending"`/`"paid"` or an `isPaid` boolean; anything else is pending
fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<PaymentStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(true)) => PaymentStatus::Paid,
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => PaymentStatus::Pending,
    })
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is `None`
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_str).and_then(|s| {
        let day = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }))
}
