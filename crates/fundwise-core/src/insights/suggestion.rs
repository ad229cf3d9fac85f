//! Rule-based suggestion for the month
//!
//! At most one suggestion is produced. A fund that overspent this month and
//! also overspent its own budget last month takes priority over a single
//! large overspend.

use chrono::Datelike;

use crate::config::InsightConfig;
use crate::period::{month_start, scaled_budget};

use super::health::overspent_by_overage;
use super::types::{FundHealth, InsightInputs, Suggestion, SuggestionType};

pub fn suggestion(
    inputs: &InsightInputs,
    health: &[FundHealth],
    config: &InsightConfig,
) -> Option<Suggestion> {
    let overspent = overspent_by_overage(health);
    let worst = overspent.first()?;

    let previous_month = month_start(inputs.reference_date)
        .pred_opt()
        .unwrap_or(inputs.reference_date);

    for candidate in overspent.iter().take(config.recurring_candidates) {
        let Some(fund) = inputs.funds.iter().find(|f| f.id == candidate.fund_id) else {
            continue;
        };
        let previous_budget = scaled_budget(fund.budgeted_amount, fund.time_mode, previous_month);
        let previous_spent = inputs.previously_spent(fund.id);

        if previous_spent > previous_budget {
            tracing::debug!(
                fund_id = fund.id,
                previous_spent = %previous_spent,
                previous_budget = %previous_budget,
                "Fund overspent two months running"
            );
            return Some(Suggestion {
                suggestion_type: SuggestionType::OverspentRecurring,
                fund_id: fund.id,
                fund_name: fund.name.clone(),
                message: format!(
                    "{} went over budget in {} and again this month. Consider raising its budget or cutting back.",
                    fund.name,
                    month_name(previous_month.month()),
                ),
            });
        }
    }

    if worst.utilization > config.large_overspend_percent {
        return Some(Suggestion {
            suggestion_type: SuggestionType::OverspentLarge,
            fund_id: worst.fund_id,
            fund_name: worst.fund_name.clone(),
            message: format!(
                "{} is at {}% of its monthly budget.",
                worst.fund_name,
                worst.utilization.round() as i64,
            ),
        });
    }

    None
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
