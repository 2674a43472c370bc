//! Insight Engine - evaluates rules in priority order

use crate::summary::FinancialSummary;

use super::types::Insight;

/// Budget usage above which the budget warning fires
pub const BUDGET_WARNING_PERCENTAGE: f64 = 90.0;

/// A single rule in the insight chain
pub trait InsightRule: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce an insight when the rule matches
    fn evaluate(&self, summary: &FinancialSummary) -> Option<Insight>;
}

/// Warns when budget usage crosses a threshold
pub struct BudgetThresholdRule {
    pub threshold: f64,
}

impl Default for BudgetThresholdRule {
    fn default() -> Self {
        Self {
            threshold: BUDGET_WARNING_PERCENTAGE,
        }
    }
}

impl InsightRule for BudgetThresholdRule {
    fn name(&self) -> &'static str {
        "budget_threshold"
    }

    fn evaluate(&self, summary: &FinancialSummary) -> Option<Insight> {
        (summary.budget_used_percentage > self.threshold).then(|| {
            Insight::warning(format!(
                "You've used over {}% of your monthly budget!",
                self.threshold
            ))
        })
    }
}

/// Warns when expenses exceed income
pub struct OverspendingRule;

impl InsightRule for OverspendingRule {
    fn name(&self) -> &'static str {
        "overspending"
    }

    fn evaluate(&self, summary: &FinancialSummary) -> Option<Insight> {
        (summary.savings < 0.0)
            .then(|| Insight::warning("Your expenses exceed your income this month."))
    }
}

/// Congratulates when income is recorded and nothing above fired
pub struct HealthyBalanceRule;

impl InsightRule for HealthyBalanceRule {
    fn name(&self) -> &'static str {
        "healthy_balance"
    }

    fn evaluate(&self, summary: &FinancialSummary) -> Option<Insight> {
        (summary.total_income > 0.0)
            .then(|| Insight::success("Great job! You are maintaining a healthy balance."))
    }
}

/// Ordered, first-match-wins rule chain
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules in priority order
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(BudgetThresholdRule::default()));
        engine.register(Box::new(OverspendingRule));
        engine.register(Box::new(HealthyBalanceRule));

        engine
    }

    /// Create an engine with no rules
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Append a rule at the lowest priority
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluate the chain; yields at most one insight
    pub fn generate(&self, summary: &FinancialSummary) -> Vec<Insight> {
        for rule in &self.rules {
            if let Some(insight) = rule.evaluate(summary) {
                tracing::debug!(rule = rule.name(), kind = %insight.kind, "Insight rule matched");
                return vec![insight];
            }
        }
        vec![]
    }
}
