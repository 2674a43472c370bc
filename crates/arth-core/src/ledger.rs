//! Ledger Reducer
//!
//! Folds income and expense entries into totals plus a per-category breakdown
//! of expenses. The fold never fails: missing or non-numeric amounts count as
//! zero, and negative amounts (which the ledger store should already reject)
//! are clamped to zero so totals stay non-negative.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{LedgerEntry, LedgerSnapshot, PaymentStatus, UpcomingPayment};

/// Category label used for expenses with no category
pub const DEFAULT_CATEGORY: &str = "Other";

/// Number of entries shown in the recent-expenses list
pub const RECENT_EXPENSES_LIMIT: usize = 5;

/// Summed amount for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

/// Output of the reducer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_income: f64,
    pub total_expense: f64,
    /// Expense totals keyed by category, in order of first occurrence
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Reduce income and expense entries into totals
pub fn reduce(incomes: &[LedgerEntry], expenses: &[LedgerEntry]) -> LedgerTotals {
    let total_income = incomes.iter().map(entry_amount).sum();

    let mut total_expense = 0.0;
    let mut category_breakdown: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        let amount = entry_amount(expense);
        total_expense += amount;

        let name = expense.label().unwrap_or(DEFAULT_CATEGORY);
        match category_breakdown.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value += amount,
            None => category_breakdown.push(CategoryTotal {
                name: name.to_string(),
                value: amount,
            }),
        }
    }

    LedgerTotals {
        total_income,
        total_expense,
        category_breakdown,
    }
}

/// Reduce a whole snapshot
pub fn reduce_snapshot(snapshot: &LedgerSnapshot) -> LedgerTotals {
    reduce(&snapshot.incomes, &snapshot.expenses)
}

/// Most recent expenses, newest first (undated entries last)
pub fn recent_expenses(expenses: &[LedgerEntry], limit: usize) -> Vec<LedgerEntry> {
    let mut sorted = expenses.to_vec();
    // Option<NaiveDate> orders None first, so reversing puts undated entries last
    sorted.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
    sorted.truncate(limit);
    sorted
}

/// Pending payments, soonest due first (undated entries last)
pub fn upcoming(payments: &[UpcomingPayment]) -> Vec<UpcomingPayment> {
    let mut pending: Vec<UpcomingPayment> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .cloned()
        .collect();
    pending.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    pending
}

/// Total still owed across pending payments
pub fn upcoming_total(payments: &[UpcomingPayment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| clamp_amount(p.amount))
        .sum()
}

/// Amount an entry contributes to totals (missing or negative is zero)
pub fn entry_amount(entry: &LedgerEntry) -> f64 {
    clamp_amount(entry.amount)
}

fn clamp_amount(amount: Option<f64>) -> f64 {
    match amount {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!(amount = value, "Ignoring invalid ledger amount");
            0.0
        }
        None => 0.0,
    }
}
