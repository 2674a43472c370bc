//! Insight Generator - dashboard alerts from a financial summary
//!
//! Insights are produced by an ordered chain of rules. The first rule that
//! matches wins, so a dashboard shows at most one insight: the most urgent
//! signal available.
//!
//! ## Built-in Rules (in priority order)
//!
//! 1. **Budget threshold** - warning when more than 90% of the budget is used
//! 2. **Overspending** - warning when expenses exceed income
//! 3. **Healthy balance** - success when any income is recorded
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arth_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate(&summary);
//! ```

pub mod engine;
pub mod types;

pub use engine::{
    BudgetThresholdRule, HealthyBalanceRule, InsightEngine, InsightRule, OverspendingRule,
};
pub use types::{Insight, InsightKind};
