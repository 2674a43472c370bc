//! Prompt Composer
//!
//! Renders the advisory prompt from a fixed, embedded template. Rendering is a
//! single pass over the template: substituted values are never re-scanned, so
//! a question containing `{{...}}` lands in the prompt verbatim.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::AdvisoryRequest;
use crate::summary::FinancialSummary;

/// Disclaimer the model is asked to close with
pub const DISCLAIMER: &str = "This is not financial advice";

const CURRENCY_SYMBOL: &str = "₹";

const ADVISORY_TEMPLATE: &str = r#"You are a personal finance assistant for an Indian user.

User financial summary:
- Total income: {{total_income}}
- Total expense: {{total_expense}}
- Monthly savings: {{savings}}
- Monthly budget limit: {{budget}}
- Budget used: {{budget_used}}%

User question:
"{{question}}"

Give:
- Simple explanation of their current savings and situation
- Beginner-friendly investment options specific to India
- Comparison of Digital Gold, Digital Silver, Mutual Funds, Stocks, and FDs
- Mention approximate Indian FD interest ranges (usually 6-8%)
- Be educational, encouraging, and beginner-friendly
- End with the disclaimer: "{{disclaimer}}"
"#;

/// Compose the advisory prompt for a question
///
/// A missing summary is rendered as all zeros.
pub fn compose(question: &str, summary: Option<&FinancialSummary>) -> Result<String> {
    if question.trim().is_empty() {
        return Err(Error::InvalidInput("Question is required".into()));
    }

    let zeroed = FinancialSummary::default();
    let summary = summary.unwrap_or(&zeroed);

    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("total_income", format_inr(summary.total_income));
    vars.insert("total_expense", format_inr(summary.total_expense));
    vars.insert("savings", format_inr(summary.savings));
    vars.insert("budget", format_inr(summary.budget));
    vars.insert(
        "budget_used",
        format_percentage(summary.budget_used_percentage),
    );
    vars.insert("question", question.to_string());
    vars.insert("disclaimer", DISCLAIMER.to_string());

    Ok(render(ADVISORY_TEMPLATE, &vars))
}

/// Compose the prompt for a validated request
pub fn compose_request(request: &AdvisoryRequest) -> Result<String> {
    compose(&request.question, Some(&request.summary))
}

/// Format an amount as rupees with Indian digit grouping, e.g. `₹1,23,456.50`
pub fn format_inr(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}.{}",
        sign,
        CURRENCY_SYMBOL,
        group_indian(whole),
        fraction
    )
}

/// One decimal place; non-finite values render as zero
pub fn format_percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        "0.0".to_string()
    }
}

/// Group digits as thousands, then pairs (lakh/crore)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut rest, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Replace `{{name}}` placeholders in one pass; unknown names are left as-is
fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::build;

    #[test]
    fn test_compose_contains_question_and_disclaimer() {
        let summary = build(50000.0, 20000.0, 30000.0);
        let prompt = compose("How much can I save?", Some(&summary)).unwrap();

        assert!(prompt.contains("\"How much can I save?\""));
        assert!(prompt.contains("This is not financial advice"));
        assert!(prompt.starts_with("You are a personal finance assistant for an Indian user."));
    }

    #[test]
    fn test_compose_formats_summary() {
        let summary = build(123456.5, 7000.0, 10000.0);
        let prompt = compose("q", Some(&summary)).unwrap();

        assert!(prompt.contains("- Total income: ₹1,23,456.50"));
        assert!(prompt.contains("- Total expense: ₹7,000.00"));
        assert!(prompt.contains("- Monthly savings: ₹1,16,456.50"));
        assert!(prompt.contains("- Monthly budget limit: ₹10,000.00"));
        assert!(prompt.contains("- Budget used: 70.0%"));
    }

    #[test]
    fn test_compose_section_order() {
        let prompt = compose("Where should I invest?", None).unwrap();

        let persona = prompt.find("personal finance assistant").unwrap();
        let summary = prompt.find("User financial summary:").unwrap();
        let question = prompt.find("User question:").unwrap();
        let instructions = prompt.find("Give:").unwrap();
        let comparison = prompt
            .find("Digital Gold, Digital Silver, Mutual Funds, Stocks, and FDs")
            .unwrap();
        let fd_range = prompt.find("6-8%").unwrap();
        let disclaimer = prompt.find(DISCLAIMER).unwrap();

        assert!(persona < summary);
        assert!(summary < question);
        assert!(question < instructions);
        assert!(instructions < comparison);
        assert!(comparison < fd_range);
        assert!(fd_range < disclaimer);
    }

    #[test]
    fn test_missing_summary_is_zero_filled() {
        let prompt = compose("Where should I invest?", None).unwrap();

        assert!(prompt.contains("- Total income: ₹0.00"));
        assert!(prompt.contains("- Budget used: 0.0%"));
    }

    #[test]
    fn test_negative_savings_formatting() {
        let prompt = compose("q", Some(&build(5000.0, 7000.0, 0.0))).unwrap();
        assert!(prompt.contains("- Monthly savings: -₹2,000.00"));
    }

    #[test]
    fn test_empty_question_is_rejected() {
        assert!(matches!(compose("", None), Err(Error::InvalidInput(_))));
        assert!(matches!(compose("  \n", None), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_question_is_not_rendered_as_template() {
        let question = "What is {{savings}} and {{budget_used}}?";
        let prompt = compose(question, None).unwrap();

        assert!(prompt.contains(question));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let summary = build(1.0, 2.0, 3.0);
        assert_eq!(
            compose("same", Some(&summary)).unwrap(),
            compose("same", Some(&summary)).unwrap()
        );
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(999.0), "₹999.00");
        assert_eq!(format_inr(1000.0), "₹1,000.00");
        assert_eq!(format_inr(100000.0), "₹1,00,000.00");
        assert_eq!(format_inr(12345678.9), "₹1,23,45,678.90");
        assert_eq!(format_inr(-2000.0), "-₹2,000.00");
        assert_eq!(format_inr(-0.001), "₹0.00");
        assert_eq!(format_inr(f64::NAN), "₹0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(95.0), "95.0");
        assert_eq!(format_percentage(33.333), "33.3");
        assert_eq!(format_percentage(f64::INFINITY), "0.0");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let vars = HashMap::from([("a", "1".to_string())]);
        assert_eq!(render("{{a}} {{b}} {{", &vars), "1 {{b}} {{");
    }
}
