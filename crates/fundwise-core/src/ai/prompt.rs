//! Prompt text for the monthly summary

use std::fmt::Write;

use crate::insights::MonthlyStats;

/// Marker the mock Ollama server keys on to recognize summary requests
pub const MONTH_SUMMARY_MARKER: &str = "monthly budget summary";

pub fn month_summary_prompt(stats: &MonthlyStats) -> String {
    let health = &stats.envelope_health;
    let comparison = &stats.month_comparison;

    let mut facts = String::new();
    let _ = writeln!(facts, "Month: {}", stats.month);
    let _ = writeln!(facts, "Total spent: {:.2}", stats.total_spending);
    let _ = writeln!(
        facts,
        "Funds on track: {}, at risk: {}, overspent: {}",
        health.on_track, health.at_risk, health.overspent
    );
    if comparison.is_first_month {
        let _ = writeln!(facts, "This is the first month with any spending recorded.");
    } else {
        let _ = writeln!(
            facts,
            "Change vs previous month: {:+.0}% (previous total {:.2})",
            comparison.percentage_change, comparison.previous_total
        );
    }
    if let Some(over) = &stats.top_overspent {
        let _ = writeln!(
            facts,
            "Most overspent fund: {} ({:.2} over a {:.2} budget)",
            over.fund_name, over.amount, over.monthly_budget
        );
    }
    if let Some(left) = &stats.top_leftover {
        let _ = writeln!(
            facts,
            "Most budget left: {} ({:.2} remaining)",
            left.fund_name, left.amount
        );
    }
    for entry in &stats.spending_breakdown {
        let _ = writeln!(
            facts,
            "Spent on {}: {:.2} ({:.0}% of total)",
            entry.fund_name, entry.amount, entry.percentage
        );
    }
    if let Some(suggestion) = &stats.suggestion {
        let _ = writeln!(facts, "Suggestion: {}", suggestion.message);
    }

    format!(
        "You write a short, friendly {marker} for a personal budgeting app.\n\
         Use only the facts below. Do not invent numbers.\n\n\
         {facts}\n\
         Respond with JSON only, in this shape:\n\
         {{\"summary\": \"two or three sentences\", \"highlights\": [\"short callout\", \"...\"]}}",
        marker = MONTH_SUMMARY_MARKER,
        facts = facts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{EnvelopeHealth, MonthComparison};
    use rust_decimal_macros::dec;

    #[test]
    fn test_prompt_contains_facts() {
        let stats = MonthlyStats {
            month: "2024-06".into(),
            envelope_health: EnvelopeHealth {
                on_track: 3,
                at_risk: 0,
                overspent: 1,
            },
            top_overspent: None,
            top_leftover: None,
            month_comparison: MonthComparison {
                current_total: dec!(120),
                previous_total: dec!(100),
                percentage_change: 20.0,
                is_first_month: false,
            },
            spending_breakdown: vec![],
            suggestion: None,
            total_spending: dec!(120),
        };
        let prompt = month_summary_prompt(&stats);
        assert!(prompt.contains(MONTH_SUMMARY_MARKER));
        assert!(prompt.contains("Month: 2024-06"));
        assert!(prompt.contains("overspent: 1"));
        assert!(prompt.contains("+20%"));
        assert!(prompt.contains("\"highlights\""));
    }
}
