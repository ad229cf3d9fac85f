//! Period resolution
//!
//! A fund's budget is expressed per period, and the number of periods in a
//! month depends on its time mode. Weeks are 7-day blocks anchored at the
//! first of the month (days 1-7 are week 1, 8-14 week 2, ...), so they
//! reset at every month boundary regardless of weekday or locale. A month
//! therefore has 4 weeks (28 days) or 5 weeks (29-31 days).

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Fund, TimeMode};

/// Last day of the first half of a bimonthly month
const FIRST_HALF_LAST_DAY: u32 = 15;

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The whole calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::new(month_start(date), month_end(date))
    }

    /// From the first of the month up to and including `date`
    pub fn month_to_date(date: NaiveDate) -> Self {
        Self::new(month_start(date), date)
    }

    /// The whole calendar month before the one containing `date`
    pub fn previous_month(date: NaiveDate) -> Self {
        let last_of_previous = month_start(date) - Duration::days(1);
        Self::month_of(last_of_previous)
    }

    /// Everything up to and including `date`
    pub fn through(date: NaiveDate) -> Self {
        Self::new(NaiveDate::MIN, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = month_start(date);
    match start.checked_add_months(Months::new(1)) {
        Some(next) => (next - start).num_days() as u32,
        // Only reachable at the very end of chrono's calendar
        None => 31,
    }
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Duration::days(i64::from(days_in_month(date)) - 1)
}

/// 1-based week of the month containing `date`
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day0() / 7 + 1
}

/// Number of weeks in the month containing `date` (4 or 5)
pub fn weeks_in_month(date: NaiveDate) -> u32 {
    days_in_month(date).div_ceil(7)
}

/// How many periods of `time_mode` fall in the month of `reference_date`
///
/// Always at least 1.
pub fn period_count(time_mode: TimeMode, reference_date: NaiveDate) -> u32 {
    match time_mode {
        TimeMode::Weekly => weeks_in_month(reference_date),
        TimeMode::Bimonthly => 2,
        TimeMode::Monthly | TimeMode::Eventually => 1,
    }
}

/// 0-based index of the period containing `reference_date`
///
/// Always strictly less than [`period_count`] for the same inputs.
pub fn current_period_index(time_mode: TimeMode, reference_date: NaiveDate) -> u32 {
    match time_mode {
        TimeMode::Weekly => week_of_month(reference_date) - 1,
        TimeMode::Bimonthly => {
            if reference_date.day() <= FIRST_HALF_LAST_DAY {
                0
            } else {
                1
            }
        }
        TimeMode::Monthly | TimeMode::Eventually => 0,
    }
}

/// A fund's budget scaled to the whole month of `reference_date`
pub fn monthly_budget(fund: &Fund, reference_date: NaiveDate) -> Decimal {
    scaled_budget(fund.budgeted_amount, fund.time_mode, reference_date)
}

/// Saturates at `Decimal::MAX` for budgets too large to scale
pub(crate) fn scaled_budget(
    budgeted_amount: Decimal,
    time_mode: TimeMode,
    reference_date: NaiveDate,
) -> Decimal {
    budgeted_amount.saturating_mul(Decimal::from(period_count(time_mode, reference_date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{test_fund, FundType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weeks_in_month() {
        assert_eq!(weeks_in_month(date(2023, 2, 10)), 4);
        assert_eq!(weeks_in_month(date(2024, 2, 10)), 5);
        assert_eq!(weeks_in_month(date(2024, 4, 1)), 5);
        assert_eq!(weeks_in_month(date(2024, 1, 31)), 5);
    }

    #[test]
    fn test_week_of_month_resets_at_month_boundary() {
        assert_eq!(week_of_month(date(2024, 1, 1)), 1);
        assert_eq!(week_of_month(date(2024, 1, 7)), 1);
        assert_eq!(week_of_month(date(2024, 1, 8)), 2);
        assert_eq!(week_of_month(date(2024, 1, 29)), 5);
        assert_eq!(week_of_month(date(2024, 2, 1)), 1);
    }

    #[test]
    fn test_period_count_always_positive() {
        let modes = [
            TimeMode::Weekly,
            TimeMode::Monthly,
            TimeMode::Bimonthly,
            TimeMode::Eventually,
        ];
        let mut day = date(2023, 1, 1);
        while day < date(2025, 1, 1) {
            for mode in modes {
                let count = period_count(mode, day);
                assert!(count >= 1);
                assert!(current_period_index(mode, day) < count);
            }
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_period_count_by_mode() {
        let d = date(2024, 3, 20);
        assert_eq!(period_count(TimeMode::Weekly, d), 5);
        assert_eq!(period_count(TimeMode::Bimonthly, d), 2);
        assert_eq!(period_count(TimeMode::Monthly, d), 1);
        assert_eq!(period_count(TimeMode::Eventually, d), 1);
    }

    #[test]
    fn test_bimonthly_day_15_is_first_half() {
        assert_eq!(current_period_index(TimeMode::Bimonthly, date(2024, 5, 15)), 0);
        assert_eq!(current_period_index(TimeMode::Bimonthly, date(2024, 5, 16)), 1);
        assert_eq!(current_period_index(TimeMode::Bimonthly, date(2024, 5, 1)), 0);
    }

    #[test]
    fn test_current_period_index_weekly() {
        assert_eq!(current_period_index(TimeMode::Weekly, date(2024, 5, 1)), 0);
        assert_eq!(current_period_index(TimeMode::Weekly, date(2024, 5, 17)), 2);
        assert_eq!(current_period_index(TimeMode::Weekly, date(2024, 5, 31)), 4);
        assert_eq!(current_period_index(TimeMode::Monthly, date(2024, 5, 31)), 0);
    }

    #[test]
    fn test_monthly_budget_scales_by_period_count() {
        let weekly = test_fund(1, "Food", dec!(100), FundType::Spending, TimeMode::Weekly);
        assert_eq!(monthly_budget(&weekly, date(2023, 2, 1)), dec!(400));
        assert_eq!(monthly_budget(&weekly, date(2023, 3, 1)), dec!(500));

        let half = test_fund(2, "Rent", dec!(600), FundType::NonNegotiable, TimeMode::Bimonthly);
        assert_eq!(monthly_budget(&half, date(2023, 3, 1)), dec!(1200));
    }

    #[test]
    fn test_month_ranges() {
        let d = date(2024, 3, 10);
        assert_eq!(DateRange::month_of(d), DateRange::new(date(2024, 3, 1), date(2024, 3, 31)));
        assert_eq!(DateRange::month_to_date(d), DateRange::new(date(2024, 3, 1), d));
        assert_eq!(
            DateRange::previous_month(d),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            DateRange::previous_month(date(2024, 1, 5)),
            DateRange::new(date(2023, 12, 1), date(2023, 12, 31))
        );
        assert!(DateRange::month_of(d).contains(date(2024, 3, 31)));
        assert!(!DateRange::month_of(d).contains(date(2024, 4, 1)));
    }
}
