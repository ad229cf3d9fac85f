//! Monthly insight aggregation

use rust_decimal::Decimal;

use crate::amounts::ratio;
use crate::config::InsightConfig;

use super::breakdown::spending_breakdown;
use super::health::{envelope_health, fund_health, top_leftover, top_overspent};
use super::suggestion::suggestion;
use super::types::{InsightInputs, MonthComparison, MonthlyStats};

/// Monthly stats with the default thresholds
pub fn monthly_stats(inputs: &InsightInputs) -> MonthlyStats {
    monthly_stats_with_config(inputs, &InsightConfig::default())
}

/// Build the full monthly summary from one snapshot of ledger aggregates
pub fn monthly_stats_with_config(inputs: &InsightInputs, config: &InsightConfig) -> MonthlyStats {
    let health = fund_health(inputs, config.at_risk_percent);
    let envelope_health = envelope_health(&health);
    let total_spending = inputs.current_total;

    let stats = MonthlyStats {
        month: inputs.reference_date.format("%Y-%m").to_string(),
        envelope_health,
        top_overspent: top_overspent(&health),
        top_leftover: top_leftover(&health),
        month_comparison: month_comparison(inputs),
        spending_breakdown: spending_breakdown(inputs, total_spending, config.breakdown_top_n),
        suggestion: suggestion(inputs, &health, config),
        total_spending,
    };

    tracing::debug!(
        month = %stats.month,
        funds = envelope_health.total(),
        overspent = envelope_health.overspent,
        total = %total_spending,
        suggestion = stats.suggestion.as_ref().map(|s| s.suggestion_type.as_str()),
        "Computed monthly stats"
    );

    stats
}

/// Month-over-month change in total spend
///
/// The change is 0 when nothing was spent last month.
pub fn month_comparison(inputs: &InsightInputs) -> MonthComparison {
    let current = inputs.current_total;
    let previous = inputs.previous_total;
    let percentage_change = if previous > Decimal::ZERO {
        ratio(current.saturating_sub(previous), previous) * 100.0
    } else {
        0.0
    };

    MonthComparison {
        current_total: current,
        previous_total: previous,
        percentage_change,
        is_first_month: inputs.transactions_before_month == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{HealthStatus, SuggestionType, OTHER_FUND_ID};
    use crate::models::{test_fund, FundType, TimeMode};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn household() -> InsightInputs {
        let funds = vec![
            test_fund(1, "Groceries", dec!(100), FundType::Spending, TimeMode::Weekly),
            test_fund(2, "Rent", dec!(1200), FundType::NonNegotiable, TimeMode::Monthly),
            test_fund(3, "Dining", dec!(150), FundType::Spending, TimeMode::Monthly),
            test_fund(4, "Vacation", dec!(3000), FundType::NonNegotiable, TimeMode::Eventually),
            test_fund(5, "Gifts", dec!(0), FundType::Spending, TimeMode::Monthly),
        ];
        let month_spend: HashMap<i64, Decimal> = [
            (1, dec!(380)),
            (2, dec!(1200)),
            (3, dec!(240)),
            (4, dec!(200)),
            (5, dec!(30)),
        ]
        .into_iter()
        .collect();
        let current_total = month_spend.values().copied().sum();

        InsightInputs {
            // June 2024: 30 days, 5 weeks
            reference_date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            funds,
            month_spend,
            previous_month_spend: [(3, dec!(170))].into_iter().collect(),
            current_total,
            previous_total: dec!(1640),
            transactions_before_month: 42,
        }
    }

    #[test]
    fn test_monthly_stats_end_to_end() {
        let stats = monthly_stats(&household());

        assert_eq!(stats.month, "2024-06");
        assert_eq!(stats.total_spending, dec!(2050));

        // Groceries 76%, Rent 100%, Dining 160%
        assert_eq!(stats.envelope_health.on_track, 1);
        assert_eq!(stats.envelope_health.at_risk, 1);
        assert_eq!(stats.envelope_health.overspent, 1);

        let over = stats.top_overspent.as_ref().unwrap();
        assert_eq!(over.fund_id, 3);
        assert_eq!(over.amount, dec!(90));

        let left = stats.top_leftover.as_ref().unwrap();
        assert_eq!(left.fund_id, 1);
        assert_eq!(left.amount, dec!(120));

        assert!((stats.month_comparison.percentage_change - 25.0).abs() < 1e-9);
        assert!(!stats.month_comparison.is_first_month);

        let ids: Vec<i64> = stats.spending_breakdown.iter().map(|e| e.fund_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4, 5]);

        let suggestion = stats.suggestion.unwrap();
        assert_eq!(suggestion.suggestion_type, SuggestionType::OverspentRecurring);
        assert_eq!(suggestion.fund_id, 3);
    }

    #[test]
    fn test_large_overspend_when_last_month_was_fine() {
        let mut inputs = household();
        inputs.previous_month_spend.clear();
        let stats = monthly_stats(&inputs);
        assert_eq!(
            stats.suggestion.unwrap().suggestion_type,
            SuggestionType::OverspentLarge
        );
    }

    #[test]
    fn test_first_month_and_zero_previous() {
        let mut inputs = household();
        inputs.previous_total = Decimal::ZERO;
        inputs.transactions_before_month = 0;

        let comparison = month_comparison(&inputs);
        assert_eq!(comparison.percentage_change, 0.0);
        assert!(comparison.is_first_month);
    }

    #[test]
    fn test_custom_config() {
        let config = InsightConfig {
            at_risk_percent: 70.0,
            breakdown_top_n: 2,
            recurring_candidates: 0,
            large_overspend_percent: 200.0,
        };
        let stats = monthly_stats_with_config(&household(), &config);

        assert_eq!(stats.envelope_health.at_risk, 2);
        assert_eq!(stats.spending_breakdown.len(), 3);
        assert_eq!(stats.spending_breakdown[2].fund_id, OTHER_FUND_ID);
        assert_eq!(stats.spending_breakdown[2].amount, dec!(470));
        assert!(stats.suggestion.is_none());
    }

    #[test]
    fn test_empty_month() {
        let inputs = InsightInputs {
            reference_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            funds: vec![],
            month_spend: HashMap::new(),
            previous_month_spend: HashMap::new(),
            current_total: Decimal::ZERO,
            previous_total: Decimal::ZERO,
            transactions_before_month: 0,
        };
        let stats = monthly_stats(&inputs);
        assert_eq!(stats.envelope_health.total(), 0);
        assert!(stats.top_overspent.is_none());
        assert!(stats.top_leftover.is_none());
        assert!(stats.spending_breakdown.is_empty());
        assert!(stats.suggestion.is_none());
    }

    #[test]
    fn test_health_statuses_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::AtRisk).unwrap(),
            "\"at_risk\""
        );
    }
}
