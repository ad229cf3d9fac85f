//! Spending breakdown by fund

use rust_decimal::Decimal;

use crate::amounts::utilization_percent;

use super::types::{BreakdownEntry, InsightInputs, OTHER_FUND_ID};

/// Rank funds by month spend and fold everything past `top_n` into "Other"
///
/// Funds with no positive spend are left out. Percentages are relative to
/// `total_spending` and are 0 when nothing was spent.
pub fn spending_breakdown(
    inputs: &InsightInputs,
    total_spending: Decimal,
    top_n: usize,
) -> Vec<BreakdownEntry> {
    let mut ranked: Vec<(i64, &str, Decimal)> = inputs
        .funds
        .iter()
        .map(|f| (f.id, f.name.as_str(), inputs.spent(f.id)))
        .filter(|(_, _, amount)| *amount > Decimal::ZERO)
        .collect();

    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

    let entry = |fund_id: i64, fund_name: &str, amount: Decimal| BreakdownEntry {
        fund_id,
        fund_name: fund_name.to_string(),
        amount,
        percentage: utilization_percent(amount, total_spending),
    };

    let mut breakdown: Vec<BreakdownEntry> = ranked
        .iter()
        .take(top_n)
        .map(|(id, name, amount)| entry(*id, name, *amount))
        .collect();

    if ranked.len() > top_n {
        let other = ranked[top_n..]
            .iter()
            .fold(Decimal::ZERO, |acc, (_, _, amount)| acc.saturating_add(*amount));
        breakdown.push(entry(OTHER_FUND_ID, "Other", other));
    }

    breakdown
}
