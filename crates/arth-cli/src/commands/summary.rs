//! Dashboard and analytics commands

use std::path::Path;

use anyhow::Result;

use arth_core::ledger::{entry_amount, DEFAULT_CATEGORY};
use arth_core::prompts::{format_inr, format_percentage};
use arth_core::{AnalyticsView, DashboardView, InsightEngine, InsightKind};

use super::{truncate, LedgerSource};

pub fn cmd_summary(source: &LedgerSource, file: Option<&Path>, json: bool) -> Result<()> {
    let snapshot = source.load(file)?;
    let view = DashboardView::from_snapshot(&snapshot, &InsightEngine::new());

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!("{}", render_dashboard(&view));
    Ok(())
}

pub fn cmd_analytics(source: &LedgerSource, file: Option<&Path>, json: bool) -> Result<()> {
    let snapshot = source.load(file)?;
    let view = AnalyticsView::from_snapshot(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!("{}", render_analytics(&view));
    Ok(())
}

/// Plain-text dashboard
pub fn render_dashboard(view: &DashboardView) -> String {
    let s = &view.summary;
    let mut out = String::new();

    out.push('\n');
    out.push_str("╭─────────────────────────────────────────╮\n");
    out.push_str("│           💰 Arth Dashboard             │\n");
    out.push_str("╰─────────────────────────────────────────╯\n");
    out.push('\n');
    out.push_str(&format!("  Income:          {}\n", format_inr(s.total_income)));
    out.push_str(&format!("  Expenses:        {}\n", format_inr(s.total_expense)));
    out.push_str(&format!("  Savings:         {}\n", format_inr(s.savings)));
    if s.budget > 0.0 {
        out.push_str(&format!(
            "  Budget:          {} ({}% used)\n",
            format_inr(s.budget),
            format_percentage(s.budget_used_percentage)
        ));
    } else {
        out.push_str("  Budget:          not set\n");
    }
    out.push('\n');

    for insight in &view.insights {
        let icon = match insight.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Success => "✅",
            InsightKind::Info => "ℹ️ ",
        };
        out.push_str(&format!("  {} {}\n", icon, insight.message));
    }
    if !view.insights.is_empty() {
        out.push('\n');
    }

    if view.upcoming_payments_count > 0 {
        out.push_str(&format!(
            "  📅 Upcoming payments: {} due ({})\n\n",
            format_inr(view.upcoming_payments_total),
            view.upcoming_payments_count
        ));
    }

    if view.recent_expenses.is_empty() {
        out.push_str("  No expenses recorded yet.\n");
    } else {
        out.push_str("  Recent expenses\n");
        out.push_str("  ─────────────────────────────\n");
        for expense in &view.recent_expenses {
            let date = expense
                .occurred_on
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".to_string());
            out.push_str(&format!(
                "  {}  {:<16} {:>14}\n",
                date,
                truncate(expense.label().unwrap_or(DEFAULT_CATEGORY), 16),
                format_inr(entry_amount(expense))
            ));
        }
    }

    out
}

/// Plain-text analytics
pub fn render_analytics(view: &AnalyticsView) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("📊 Income vs Expense\n");
    out.push_str(&format!("   Income:   {}\n", format_inr(view.total_income)));
    out.push_str(&format!("   Expense:  {}\n", format_inr(view.total_expense)));
    out.push('\n');

    if view.category_stats.is_empty() {
        out.push_str("   No expenses recorded yet.\n");
        return out;
    }

    out.push_str("📁 Spending by category\n");
    out.push_str("   ─────────────────────────────\n");
    for stat in &view.category_stats {
        let share = if view.total_expense > 0.0 {
            stat.value / view.total_expense * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "   {:<16} {:>14}  {:>5}%\n",
            truncate(&stat.name, 16),
            format_inr(stat.value),
            format_percentage(share)
        ));
    }

    out
}
