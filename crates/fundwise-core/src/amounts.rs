//! Conversions from decimal amounts to display ratios
//!
//! Money stays in `Decimal`; only the final ratio or percentage handed to
//! callers becomes `f64`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `numerator / denominator`, or 0 when the denominator is zero
///
/// Quotients outside the `Decimal` range are computed in `f64` instead.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    match numerator.checked_div(denominator) {
        Some(quotient) => to_f64(quotient),
        None => to_f64(numerator) / to_f64(denominator),
    }
}

/// `spent / budget * 100`, or 0 when the budget is zero
///
/// Falls back to `f64` when the percentage overflows `Decimal`.
pub fn utilization_percent(spent: Decimal, budget: Decimal) -> f64 {
    if budget.is_zero() {
        return 0.0;
    }
    match spent
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(budget))
    {
        Some(percent) => to_f64(percent),
        None => to_f64(spent) / to_f64(budget) * 100.0,
    }
}
