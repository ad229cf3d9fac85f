//! Envelope health and highlight funds

use rust_decimal::Decimal;

use crate::amounts::utilization_percent;
use crate::period::monthly_budget;

use super::types::{EnvelopeHealth, FundHealth, HealthStatus, HighlightFund, InsightInputs};

/// Health band for `spent` against a whole-month budget
///
/// Overspent compares the exact amounts. The utilization percentage only
/// decides the at-risk band.
pub fn classify(spent: Decimal, monthly_budget: Decimal, at_risk_percent: f64) -> HealthStatus {
    if spent > monthly_budget {
        HealthStatus::Overspent
    } else if utilization_percent(spent, monthly_budget) >= at_risk_percent {
        HealthStatus::AtRisk
    } else {
        HealthStatus::OnTrack
    }
}

/// Evaluate every recurring budgeted fund against its whole-month budget
///
/// Result is ordered by fund id.
pub fn fund_health(inputs: &InsightInputs, at_risk_percent: f64) -> Vec<FundHealth> {
    let mut health: Vec<FundHealth> = inputs
        .funds
        .iter()
        .filter(|f| f.is_recurring() && f.is_budgeted())
        .filter_map(|fund| {
            let budget = monthly_budget(fund, inputs.reference_date);
            if budget.is_zero() {
                return None;
            }
            let spent = inputs.spent(fund.id);

            Some(FundHealth {
                fund_id: fund.id,
                fund_name: fund.name.clone(),
                spent,
                monthly_budget: budget,
                utilization: utilization_percent(spent, budget),
                status: classify(spent, budget, at_risk_percent),
            })
        })
        .collect();

    health.sort_by_key(|h| h.fund_id);
    health
}

pub fn envelope_health(health: &[FundHealth]) -> EnvelopeHealth {
    let mut counts = EnvelopeHealth::default();
    for entry in health {
        counts.record(entry.status);
    }
    counts
}

/// Overspent funds, largest overage first (ties by ascending fund id)
pub fn overspent_by_overage(health: &[FundHealth]) -> Vec<&FundHealth> {
    let mut overspent: Vec<&FundHealth> = health
        .iter()
        .filter(|h| h.status == HealthStatus::Overspent)
        .collect();
    overspent.sort_by(|a, b| {
        b.overage()
            .cmp(&a.overage())
            .then_with(|| a.fund_id.cmp(&b.fund_id))
    });
    overspent
}

pub fn top_overspent(health: &[FundHealth]) -> Option<HighlightFund> {
    overspent_by_overage(health)
        .first()
        .map(|h| highlight(h, h.overage()))
}

/// Fund with the most budget left; none when every fund is at or over budget
pub fn top_leftover(health: &[FundHealth]) -> Option<HighlightFund> {
    health
        .iter()
        .filter(|h| h.leftover() > Decimal::ZERO)
        .max_by(|a, b| {
            a.leftover()
                .cmp(&b.leftover())
                .then_with(|| b.fund_id.cmp(&a.fund_id))
        })
        .map(|h| highlight(h, h.leftover()))
}

fn highlight(health: &FundHealth, amount: Decimal) -> HighlightFund {
    HighlightFund {
        fund_id: health.fund_id,
        fund_name: health.fund_name.clone(),
        spent: health.spent,
        monthly_budget: health.monthly_budget,
        amount,
        utilization: health.utilization,
    }
}
