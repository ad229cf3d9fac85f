//! Core types for monthly insights

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Fund;

/// Everything the insight rules read for one month
#[derive(Debug, Clone)]
pub struct InsightInputs {
    /// Any day in the month being analyzed, normally today
    pub reference_date: NaiveDate,
    /// Enabled funds, any budget state
    pub funds: Vec<Fund>,
    /// Month-to-date spend keyed by fund id; missing funds spent nothing
    pub month_spend: HashMap<i64, Decimal>,
    /// Whole previous-month spend keyed by fund id
    pub previous_month_spend: HashMap<i64, Decimal>,
    pub current_total: Decimal,
    pub previous_total: Decimal,
    /// Transactions dated before the first of the month
    pub transactions_before_month: u64,
}

impl InsightInputs {
    pub fn spent(&self, fund_id: i64) -> Decimal {
        self.month_spend.get(&fund_id).copied().unwrap_or_default()
    }

    pub fn previously_spent(&self, fund_id: i64) -> Decimal {
        self.previous_month_spend
            .get(&fund_id)
            .copied()
            .unwrap_or_default()
    }
}

/// Month-to-date health band of a recurring fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    OnTrack,
    AtRisk,
    Overspent,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::Overspent => "overspent",
        }
    }
}

/// Counts of recurring budgeted funds per health band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeHealth {
    pub on_track: u32,
    pub at_risk: u32,
    pub overspent: u32,
}

impl EnvelopeHealth {
    pub fn total(&self) -> u32 {
        self.on_track + self.at_risk + self.overspent
    }

    pub(crate) fn record(&mut self, status: HealthStatus) {
        match status {
            HealthStatus::OnTrack => self.on_track += 1,
            HealthStatus::AtRisk => self.at_risk += 1,
            HealthStatus::Overspent => self.overspent += 1,
        }
    }
}

/// A recurring fund evaluated against its whole-month budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHealth {
    pub fund_id: i64,
    pub fund_name: String,
    pub spent: Decimal,
    pub monthly_budget: Decimal,
    pub utilization: f64,
    pub status: HealthStatus,
}

impl FundHealth {
    /// Positive when over budget
    pub fn overage(&self) -> Decimal {
        self.spent.saturating_sub(self.monthly_budget)
    }

    /// Positive when under budget
    pub fn leftover(&self) -> Decimal {
        self.monthly_budget.saturating_sub(self.spent)
    }
}

/// A fund called out in the monthly summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightFund {
    pub fund_id: i64,
    pub fund_name: String,
    pub spent: Decimal,
    pub monthly_budget: Decimal,
    /// Overage for the top overspent fund, leftover for the top leftover fund
    pub amount: Decimal,
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub current_total: Decimal,
    pub previous_total: Decimal,
    pub percentage_change: f64,
    /// No transactions exist before this month
    pub is_first_month: bool,
}

/// Fund id of the synthetic entry that aggregates the breakdown tail
pub const OTHER_FUND_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub fund_id: i64,
    pub fund_name: String,
    pub amount: Decimal,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    /// Over budget this month and last month
    OverspentRecurring,
    /// Far over budget this month
    OverspentLarge,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverspentRecurring => "overspent_recurring",
            Self::OverspentLarge => "overspent_large",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub fund_id: i64,
    pub fund_name: String,
    pub message: String,
}

/// Deterministic monthly insight summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// "YYYY-MM"
    pub month: String,
    pub envelope_health: EnvelopeHealth,
    pub top_overspent: Option<HighlightFund>,
    pub top_leftover: Option<HighlightFund>,
    pub month_comparison: MonthComparison,
    pub spending_breakdown: Vec<BreakdownEntry>,
    pub suggestion: Option<Suggestion>,
    pub total_spending: Decimal,
}
