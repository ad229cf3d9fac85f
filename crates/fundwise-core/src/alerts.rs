//! Budget alerts for funds at or near their limit

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amounts::utilization_percent;
use crate::config::AlertConfig;
use crate::models::FundSpend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    OverBudget,
    AlmostOver,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverBudget => "over_budget",
            Self::AlmostOver => "almost_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub fund_id: i64,
    pub fund_name: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub budget: Decimal,
    pub spent: Decimal,
    pub utilization: f64,
    /// Amount over budget (over_budget alerts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage: Option<Decimal>,
    /// Amount left before hitting the budget (almost_over alerts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
}

/// Alerts with the default 90% threshold
pub fn budget_alerts(funds: &[FundSpend]) -> Vec<BudgetAlert> {
    budget_alerts_with_config(funds, &AlertConfig::default())
}

/// Every budgeted fund at or above the threshold, most urgent first
pub fn budget_alerts_with_config(funds: &[FundSpend], config: &AlertConfig) -> Vec<BudgetAlert> {
    let mut alerts: Vec<BudgetAlert> = funds
        .iter()
        .filter(|f| f.fund.is_scored())
        .filter_map(|entry| {
            let budget = entry.fund.budgeted_amount;
            let utilization = utilization_percent(entry.spent, budget);

            let (alert_type, severity, overage, remaining) = if utilization >= 100.0 {
                (
                    AlertType::OverBudget,
                    AlertSeverity::Critical,
                    Some(entry.spent.saturating_sub(budget)),
                    None,
                )
            } else if utilization >= config.threshold_percent {
                (
                    AlertType::AlmostOver,
                    AlertSeverity::Warning,
                    None,
                    Some(budget.saturating_sub(entry.spent)),
                )
            } else {
                return None;
            };

            Some(BudgetAlert {
                fund_id: entry.fund.id,
                fund_name: entry.fund.name.clone(),
                alert_type,
                severity,
                budget,
                spent: entry.spent,
                utilization,
                overage,
                remaining,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.severity
            .priority()
            .cmp(&a.severity.priority())
            .then_with(|| b.utilization.total_cmp(&a.utilization))
            .then_with(|| a.fund_id.cmp(&b.fund_id))
    });

    tracing::debug!(count = alerts.len(), "Computed budget alerts");
    alerts
}

/// The `limit` most urgent alerts
pub fn top_alerts(mut alerts: Vec<BudgetAlert>, limit: usize) -> Vec<BudgetAlert> {
    alerts.truncate(limit);
    alerts
}
