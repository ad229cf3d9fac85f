//! Per-period and rolling progress for a single fund
//!
//! Two views of the same spend:
//!
//! - [`allocate_progress`] splits the spend across the month's periods and
//!   returns one bar per period. Spending funds are drained from the most
//!   recent period backwards; non-negotiable funds are filled from the
//!   first period forwards.
//! - [`rolling_progress`] collapses the month into a single ratio using the
//!   cumulative budget available so far, so a surplus or deficit carries
//!   across periods.
//!
//! Both require a strictly positive per-period budget. Callers filter out
//! unbudgeted funds before getting here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amounts::{ratio, to_f64};
use crate::error::{Error, Result};
use crate::models::{Fund, FundType};
use crate::period::{current_period_index, period_count};

/// Per-period progress bars plus overflow beyond all periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    /// One value per period, in period order. For spending funds this is
    /// the share of the period's budget left; for non-negotiable funds the
    /// share of the period's target funded.
    pub progress_bars: Vec<f64>,
    /// Spend beyond every period's budget, as a multiple of one period's
    /// budget
    pub overspent_ratio: f64,
    /// Savings beyond every period's target, as a multiple of one period's
    /// target
    pub overfunded_ratio: f64,
}

/// A single consolidated remaining/saved ratio for the month so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingProgressResult {
    pub progress: f64,
    pub overspent_ratio: f64,
    pub overfunded_ratio: f64,
}

fn check_budget(budgeted_amount: Decimal) -> Result<()> {
    if budgeted_amount <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "budgeted amount must be positive, got {}",
            budgeted_amount
        )));
    }
    Ok(())
}

/// Refunds can leave a fund with negative net spend; progress treats that
/// as nothing spent.
fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Split `total_spent` across `bar_count` periods of `budgeted_amount` each
pub fn allocate_progress(
    budgeted_amount: Decimal,
    total_spent: Decimal,
    fund_type: FundType,
    bar_count: u32,
) -> Result<ProgressResult> {
    check_budget(budgeted_amount)?;
    if bar_count == 0 {
        return Err(Error::InvalidInput("bar count must be at least 1".into()));
    }

    let total_spent = non_negative(total_spent);
    let result = match fund_type {
        FundType::Spending => deplete(budgeted_amount, total_spent, bar_count),
        FundType::NonNegotiable => accumulate(budgeted_amount, total_spent, bar_count),
    };

    tracing::debug!(
        fund_type = fund_type.as_str(),
        bar_count,
        overspent = result.overspent_ratio,
        overfunded = result.overfunded_ratio,
        "Allocated progress bars"
    );

    Ok(result)
}

/// Spending: settle the most recent period first
fn deplete(budget: Decimal, total_spent: Decimal, bar_count: u32) -> ProgressResult {
    let mut bars = vec![0.0; bar_count as usize];
    let mut remaining = total_spent;

    for bar in bars.iter_mut().rev() {
        if remaining >= budget {
            *bar = 0.0;
            remaining -= budget;
        } else {
            *bar = to_f64(Decimal::ONE - remaining / budget);
            remaining = Decimal::ZERO;
        }
    }

    ProgressResult {
        progress_bars: bars,
        overspent_ratio: ratio(remaining, budget),
        overfunded_ratio: 0.0,
    }
}

/// Non-negotiable: fund the earliest period first
fn accumulate(budget: Decimal, total_saved: Decimal, bar_count: u32) -> ProgressResult {
    let mut bars = vec![0.0; bar_count as usize];
    let mut accumulated = total_saved;

    for bar in bars.iter_mut() {
        if accumulated >= budget {
            *bar = 1.0;
            accumulated -= budget;
        } else {
            *bar = ratio(accumulated, budget);
            accumulated = Decimal::ZERO;
        }
    }

    ProgressResult {
        progress_bars: bars,
        overspent_ratio: 0.0,
        overfunded_ratio: ratio(accumulated, budget),
    }
}

/// Consolidated progress using the budget accumulated through the current
/// period (spending) or the whole month's target (non-negotiable)
pub fn rolling_progress(
    budgeted_amount: Decimal,
    total_spent: Decimal,
    fund_type: FundType,
    period_count: u32,
    current_period_index: u32,
) -> Result<RollingProgressResult> {
    check_budget(budgeted_amount)?;
    let total_spent = non_negative(total_spent);

    let result = match fund_type {
        FundType::Spending => {
            let budget_through_now =
                budgeted_amount.saturating_mul(Decimal::from(current_period_index + 1));
            let rolling_remaining = budget_through_now - total_spent;

            if rolling_remaining < Decimal::ZERO {
                RollingProgressResult {
                    progress: 0.0,
                    overspent_ratio: ratio(rolling_remaining.abs(), budgeted_amount),
                    overfunded_ratio: 0.0,
                }
            } else {
                RollingProgressResult {
                    progress: if budget_through_now > Decimal::ZERO {
                        ratio(rolling_remaining, budget_through_now)
                    } else {
                        1.0
                    },
                    overspent_ratio: 0.0,
                    overfunded_ratio: 0.0,
                }
            }
        }
        FundType::NonNegotiable => {
            let monthly_target = budgeted_amount.saturating_mul(Decimal::from(period_count));
            let amount_saved = total_spent;

            if amount_saved >= monthly_target {
                RollingProgressResult {
                    progress: 1.0,
                    overspent_ratio: 0.0,
                    overfunded_ratio: ratio(amount_saved - monthly_target, budgeted_amount),
                }
            } else {
                RollingProgressResult {
                    progress: if monthly_target > Decimal::ZERO {
                        ratio(amount_saved, monthly_target)
                    } else {
                        0.0
                    },
                    overspent_ratio: 0.0,
                    overfunded_ratio: 0.0,
                }
            }
        }
    };

    Ok(result)
}

/// Both progress views for `fund` in the month of `reference_date`
pub fn fund_progress(
    fund: &Fund,
    spent: Decimal,
    reference_date: NaiveDate,
) -> Result<(ProgressResult, RollingProgressResult)> {
    let count = period_count(fund.time_mode, reference_date);
    let index = current_period_index(fund.time_mode, reference_date);

    let bars = allocate_progress(fund.budgeted_amount, spent, fund.fund_type, count)?;
    let rolling = rolling_progress(fund.budgeted_amount, spent, fund.fund_type, count, index)?;
    Ok((bars, rolling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{test_fund, TimeMode};
    use rust_decimal_macros::dec;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_monthly_overspend() {
        let result = allocate_progress(dec!(1000), dec!(1200), FundType::Spending, 1).unwrap();
        assert_eq!(result.progress_bars, vec![0.0]);
        assert_close(result.overspent_ratio, 0.2);
        assert_eq!(result.overfunded_ratio, 0.0);

        let rolling = rolling_progress(dec!(1000), dec!(1200), FundType::Spending, 1, 0).unwrap();
        assert_eq!(rolling.progress, 0.0);
        assert_close(rolling.overspent_ratio, 0.2);
    }

    #[test]
    fn test_weekly_backward_fill() {
        let result = allocate_progress(dec!(500), dec!(900), FundType::Spending, 4).unwrap();
        assert_close(result.progress_bars[3], 0.0);
        assert_close(result.progress_bars[2], 0.2);
        assert_close(result.progress_bars[1], 1.0);
        assert_close(result.progress_bars[0], 1.0);
        assert_eq!(result.overspent_ratio, 0.0);
    }

    #[test]
    fn test_accumulation_fills_forward() {
        let result =
            allocate_progress(dec!(200), dec!(500), FundType::NonNegotiable, 4).unwrap();
        assert_eq!(result.progress_bars[0], 1.0);
        assert_eq!(result.progress_bars[1], 1.0);
        assert_close(result.progress_bars[2], 0.5);
        assert_eq!(result.progress_bars[3], 0.0);
        assert_eq!(result.overfunded_ratio, 0.0);
        assert_eq!(result.overspent_ratio, 0.0);
    }

    #[test]
    fn test_accumulation_overfunded() {
        let result =
            allocate_progress(dec!(100), dec!(250), FundType::NonNegotiable, 2).unwrap();
        assert_eq!(result.progress_bars, vec![1.0, 1.0]);
        assert_close(result.overfunded_ratio, 0.5);
    }

    #[test]
    fn test_spending_conservation() {
        let budget = dec!(75);
        for bar_count in 1..=5u32 {
            for spent in [dec!(0), dec!(10), dec!(74.99), dec!(75), dec!(150), dec!(333.33), dec!(1000)] {
                let result =
                    allocate_progress(budget, spent, FundType::Spending, bar_count).unwrap();
                let consumed: f64 = result
                    .progress_bars
                    .iter()
                    .map(|bar| (1.0 - bar) * 75.0)
                    .sum::<f64>()
                    + result.overspent_ratio * 75.0;
                assert!(
                    (consumed - to_f64(spent)).abs() < 1e-6,
                    "bars={} spent={} consumed={}",
                    bar_count,
                    spent,
                    consumed
                );
            }
        }
    }

    #[test]
    fn test_overspent_implies_all_bars_empty() {
        for spent in [dec!(299), dec!(300), dec!(301), dec!(450)] {
            let result = allocate_progress(dec!(100), spent, FundType::Spending, 3).unwrap();
            if result.overspent_ratio > 0.0 {
                assert!(spent > dec!(300));
                assert!(result.progress_bars.iter().all(|bar| *bar == 0.0));
            } else {
                assert!(spent <= dec!(300));
            }
        }
    }

    #[test]
    fn test_boundary_agreement_spending() {
        // Spent exactly the whole month's budget on the last week
        let bars = allocate_progress(dec!(50), dec!(200), FundType::Spending, 4).unwrap();
        let rolling = rolling_progress(dec!(50), dec!(200), FundType::Spending, 4, 3).unwrap();
        assert_eq!(rolling.progress, 0.0);
        assert_eq!(rolling.overspent_ratio, 0.0);
        assert_eq!(*bars.progress_bars.last().unwrap(), 0.0);
        assert_eq!(bars.overspent_ratio, 0.0);
    }

    #[test]
    fn test_boundary_agreement_non_negotiable() {
        let bars = allocate_progress(dec!(50), dec!(100), FundType::NonNegotiable, 2).unwrap();
        let rolling =
            rolling_progress(dec!(50), dec!(100), FundType::NonNegotiable, 2, 0).unwrap();
        assert_eq!(rolling.progress, 1.0);
        assert_eq!(rolling.overfunded_ratio, 0.0);
        assert_eq!(*bars.progress_bars.last().unwrap(), 1.0);
    }

    #[test]
    fn test_rolling_spending_carries_surplus() {
        // Third week of a weekly fund: 300 available so far, 120 spent
        let rolling = rolling_progress(dec!(100), dec!(120), FundType::Spending, 5, 2).unwrap();
        assert_close(rolling.progress, 0.6);
        assert_eq!(rolling.overspent_ratio, 0.0);

        // Deficit is measured in single-period budgets
        let rolling = rolling_progress(dec!(100), dec!(350), FundType::Spending, 5, 2).unwrap();
        assert_eq!(rolling.progress, 0.0);
        assert_close(rolling.overspent_ratio, 0.5);
    }

    #[test]
    fn test_rolling_non_negotiable_partial_and_overfunded() {
        let partial =
            rolling_progress(dec!(100), dec!(150), FundType::NonNegotiable, 4, 1).unwrap();
        assert_close(partial.progress, 0.375);

        let over = rolling_progress(dec!(100), dec!(450), FundType::NonNegotiable, 4, 3).unwrap();
        assert_eq!(over.progress, 1.0);
        assert_close(over.overfunded_ratio, 0.5);
    }

    #[test]
    fn test_rejects_non_positive_budget() {
        assert!(matches!(
            allocate_progress(Decimal::ZERO, dec!(10), FundType::Spending, 1),
            Err(Error::InvalidInput(_))
        ));
        assert!(rolling_progress(dec!(-5), dec!(10), FundType::Spending, 1, 0).is_err());
        assert!(allocate_progress(dec!(10), dec!(10), FundType::Spending, 0).is_err());
    }

    #[test]
    fn test_negative_net_spend_counts_as_zero() {
        let result = allocate_progress(dec!(100), dec!(-20), FundType::Spending, 2).unwrap();
        assert_eq!(result.progress_bars, vec![1.0, 1.0]);
    }

    #[test]
    fn test_fund_progress_uses_reference_month() {
        let fund = test_fund(1, "Groceries", dec!(100), FundType::Spending, TimeMode::Weekly);
        // February 2023 has 4 weeks; the 16th falls in week 3
        let date = NaiveDate::from_ymd_opt(2023, 2, 16).unwrap();
        let (bars, rolling) = fund_progress(&fund, dec!(150), date).unwrap();
        assert_eq!(bars.progress_bars.len(), 4);
        assert_close(bars.progress_bars[2], 0.5);
        assert_close(rolling.progress, 0.5);
    }

    #[test]
    fn test_budget_near_decimal_max_saturates() {
        let budget = dec!(70000000000000000000000000000);
        let rolling = rolling_progress(budget, dec!(10), FundType::Spending, 5, 4).unwrap();
        assert!(rolling.progress > 0.99 && rolling.progress <= 1.0);

        let saved = rolling_progress(budget, dec!(10), FundType::NonNegotiable, 5, 0).unwrap();
        assert!(saved.progress >= 0.0 && saved.progress < 1e-20);

        let fund = test_fund(1, "Vault", budget, FundType::Spending, TimeMode::Weekly);
        let date = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(crate::period::monthly_budget(&fund, date), Decimal::MAX);
    }
}
