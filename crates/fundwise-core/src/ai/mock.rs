//! Mock backend for testing
//!
//! Builds a summary straight from the stats without any model. Useful for
//! unit tests and for running the CLI without a local LLM server.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::insights::MonthlyStats;

use super::types::MonthSummary;
use super::SummaryBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Whether summarize_month should return an error
    pub fail: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            fail: false,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            fail: false,
        }
    }

    /// A backend whose every summary request fails
    pub fn failing() -> Self {
        Self {
            healthy: true,
            fail: true,
        }
    }
}

#[async_trait]
impl SummaryBackend for MockBackend {
    async fn summarize_month(&self, stats: &MonthlyStats) -> Result<MonthSummary> {
        if self.fail {
            return Err(Error::Ai("mock backend configured to fail".into()));
        }

        let health = &stats.envelope_health;
        let summary = format!(
            "In {} you spent {:.2}. {} of {} funds are on track.",
            stats.month,
            stats.total_spending,
            health.on_track,
            health.total()
        );

        let mut highlights = Vec::new();
        if let Some(over) = &stats.top_overspent {
            highlights.push(format!("{} is {:.2} over budget", over.fund_name, over.amount));
        }
        if let Some(left) = &stats.top_leftover {
            highlights.push(format!("{} has {:.2} left", left.fund_name, left.amount));
        }
        if let Some(suggestion) = &stats.suggestion {
            highlights.push(suggestion.message.clone());
        }

        Ok(MonthSummary {
            summary,
            highlights,
            model: "mock".to_string(),
            generated_at: chrono::Utc::now(),
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{EnvelopeHealth, HighlightFund, MonthComparison};
    use rust_decimal_macros::dec;

    fn stats() -> MonthlyStats {
        MonthlyStats {
            month: "2024-05".into(),
            envelope_health: EnvelopeHealth {
                on_track: 1,
                at_risk: 0,
                overspent: 1,
            },
            top_overspent: Some(HighlightFund {
                fund_id: 3,
                fund_name: "Dining".into(),
                spent: dec!(240),
                monthly_budget: dec!(150),
                amount: dec!(90),
                utilization: 160.0,
            }),
            top_leftover: None,
            month_comparison: MonthComparison {
                current_total: dec!(640),
                previous_total: dec!(0),
                percentage_change: 0.0,
                is_first_month: true,
            },
            spending_breakdown: vec![],
            suggestion: None,
            total_spending: dec!(640),
        }
    }

    #[tokio::test]
    async fn test_mock_summary() {
        let backend = MockBackend::new();
        let summary = backend.summarize_month(&stats()).await.unwrap();
        assert_eq!(summary.summary, "In 2024-05 you spent 640.00. 1 of 2 funds are on track.");
        assert_eq!(summary.highlights, vec!["Dining is 90.00 over budget"]);
    }

    #[tokio::test]
    async fn test_mock_failure_and_health() {
        assert!(MockBackend::failing().summarize_month(&stats()).await.is_err());
        assert!(MockBackend::new().health_check().await);
        assert!(!MockBackend::unhealthy().health_check().await);
    }
}
