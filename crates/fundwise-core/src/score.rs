//! Budget score
//!
//! An explainable 0-100 score over the month-to-date spend of every
//! budgeted fund. Each deduction or bonus is reported as a factor so the
//! number can be traced back to the funds that moved it.

use serde::{Deserialize, Serialize};

use crate::amounts::utilization_percent;
use crate::config::ScoreConfig;
use crate::models::FundSpend;

const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    OnTrack,
    NeedsAttention,
    OverBudget,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NeedsAttention => "needs_attention",
            Self::OverBudget => "over_budget",
        }
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One contribution to the score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub description: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetScore {
    pub score: u8,
    pub status: ScoreStatus,
    pub factors: Vec<ScoreFactor>,
}

/// Score with the default weights
pub fn budget_score(funds: &[FundSpend]) -> BudgetScore {
    budget_score_with_config(funds, &ScoreConfig::default())
}

pub fn budget_score_with_config(funds: &[FundSpend], config: &ScoreConfig) -> BudgetScore {
    let mut budgeted: Vec<&FundSpend> = funds.iter().filter(|f| f.fund.is_scored()).collect();

    if budgeted.is_empty() {
        return BudgetScore {
            score: MAX_SCORE as u8,
            status: ScoreStatus::OnTrack,
            factors: vec![],
        };
    }

    // Stable factor order regardless of how the ledger returned funds
    budgeted.sort_by(|a, b| {
        a.fund
            .name
            .cmp(&b.fund.name)
            .then_with(|| a.fund.id.cmp(&b.fund.id))
    });

    let mut score = MAX_SCORE;
    let mut factors = Vec::new();
    let mut under_budget_count = 0usize;

    for entry in &budgeted {
        let utilization = utilization_percent(entry.spent, entry.fund.budgeted_amount);

        if utilization > 100.0 {
            score -= config.over_budget_penalty;
            factors.push(ScoreFactor {
                description: format!("{} is over budget", entry.fund.name),
                points: -config.over_budget_penalty,
            });
        } else if utilization > config.near_limit_percent {
            score -= config.near_limit_penalty;
            factors.push(ScoreFactor {
                description: format!("{} at {}%", entry.fund.name, utilization.round() as i64),
                points: -config.near_limit_penalty,
            });
        } else {
            under_budget_count += 1;
        }
    }

    let total = budgeted.len();
    if under_budget_count as f64 / total as f64 > config.bonus_ratio {
        score += config.under_budget_bonus;
        factors.push(ScoreFactor {
            description: format!("{}/{} funds under budget", under_budget_count, total),
            points: config.under_budget_bonus,
        });
    }

    let score = score.clamp(0, MAX_SCORE);
    let status = if score >= config.on_track_min {
        ScoreStatus::OnTrack
    } else if score >= config.needs_attention_min {
        ScoreStatus::NeedsAttention
    } else {
        ScoreStatus::OverBudget
    };

    tracing::debug!(
        score,
        status = status.as_str(),
        funds = total,
        under_budget = under_budget_count,
        "Computed budget score"
    );

    BudgetScore {
        score: score as u8,
        status,
        factors,
    }
}
