//! Summary Builder
//!
//! Combines reducer totals with the user's budget into a [`FinancialSummary`].
//! Summaries are derived fresh for every request and never cached here.

use serde::{Deserialize, Serialize};

use crate::insights::{Insight, InsightEngine};
use crate::ledger::{self, CategoryTotal};
use crate::models::{lenient_amount_or_zero, LedgerEntry, LedgerSnapshot, UpcomingPayment};

/// Derived aggregate of a user's ledger
///
/// Also the `summary` payload of `POST /api/chat`, so every field is optional
/// on the wire and defaults to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    #[serde(deserialize_with = "lenient_amount_or_zero")]
    pub total_income: f64,
    #[serde(deserialize_with = "lenient_amount_or_zero")]
    pub total_expense: f64,
    /// Income minus expense; negative when overspending
    #[serde(deserialize_with = "lenient_amount_or_zero")]
    pub savings: f64,
    #[serde(deserialize_with = "lenient_amount_or_zero")]
    pub budget: f64,
    /// Unbounded above; zero whenever the budget is not positive
    #[serde(deserialize_with = "lenient_amount_or_zero")]
    pub budget_used_percentage: f64,
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Build a summary from totals and a budget ceiling
pub fn build(total_income: f64, total_expense: f64, budget: f64) -> FinancialSummary {
    let budget_used_percentage = if budget > 0.0 {
        (total_expense / budget) * 100.0
    } else {
        0.0
    };

    FinancialSummary {
        total_income,
        total_expense,
        savings: total_income - total_expense,
        budget,
        budget_used_percentage,
        category_breakdown: Vec::new(),
    }
}

/// Reduce a ledger snapshot and build its summary
pub fn aggregate(snapshot: &LedgerSnapshot) -> FinancialSummary {
    let totals = ledger::reduce_snapshot(snapshot);
    let budget = if snapshot.budget.is_finite() && snapshot.budget > 0.0 {
        snapshot.budget
    } else {
        0.0
    };

    FinancialSummary {
        category_breakdown: totals.category_breakdown,
        ..build(totals.total_income, totals.total_expense, budget)
    }
}

/// Everything the dashboard shows for one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: FinancialSummary,
    pub insights: Vec<Insight>,
    pub recent_expenses: Vec<LedgerEntry>,
    pub upcoming_payments_total: f64,
    pub upcoming_payments_count: usize,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &LedgerSnapshot, engine: &InsightEngine) -> Self {
        let summary = aggregate(snapshot);
        let insights = engine.generate(&summary);
        let pending = ledger::upcoming(&snapshot.upcoming_payments);

        Self {
            insights,
            recent_expenses: ledger::recent_expenses(
                &snapshot.expenses,
                ledger::RECENT_EXPENSES_LIMIT,
            ),
            upcoming_payments_total: ledger::upcoming_total(&pending),
            upcoming_payments_count: pending.len(),
            summary,
        }
    }
}

/// Income vs expense totals and the expense category split
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub total_income: f64,
    pub total_expense: f64,
    pub category_stats: Vec<CategoryTotal>,
}

impl AnalyticsView {
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        let totals = ledger::reduce_snapshot(snapshot);
        Self {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            category_stats: totals.category_breakdown,
        }
    }
}

/// Pending payments for a snapshot, soonest first
pub fn upcoming_payments(snapshot: &LedgerSnapshot) -> Vec<UpcomingPayment> {
    ledger::upcoming(&snapshot.upcoming_payments)
}
