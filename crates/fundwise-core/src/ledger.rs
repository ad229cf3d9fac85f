//! Ledger boundary
//!
//! The engine never queries storage directly. A [`Ledger`] hands back
//! aggregates, and [`MonthSnapshot`] gathers every aggregate one month of
//! reporting needs into a single immutable value that score, alerts,
//! progress and insights all read from.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::insights::InsightInputs;
use crate::models::{Fund, FundSpend};
use crate::period::{monthly_budget, month_start, DateRange};
use crate::progress::{fund_progress, ProgressResult, RollingProgressResult};

/// Read-only aggregate source for the engine
pub trait Ledger {
    /// Enabled funds owned by `user_id`
    fn funds(&self, user_id: i64) -> Result<Vec<Fund>>;

    /// Net spend per fund within `range`; funds without transactions may be
    /// absent from the map
    fn spend_by_fund(&self, fund_ids: &[i64], range: DateRange) -> Result<HashMap<i64, Decimal>>;

    /// Net spend across the user's enabled funds within `range`
    fn total_spend(&self, user_id: i64, range: DateRange) -> Result<Decimal>;

    /// Transactions dated strictly before `date`, across all of the user's funds
    fn transactions_before(&self, user_id: i64, date: NaiveDate) -> Result<u64>;
}

/// One fund's dashboard row: spend, month budget and both progress views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundOverview {
    pub fund: Fund,
    pub spent: Decimal,
    pub monthly_budget: Decimal,
    pub progress: ProgressResult,
    pub rolling: RollingProgressResult,
}

/// Ledger aggregates for the month containing `reference_date`
#[derive(Debug, Clone)]
pub struct MonthSnapshot {
    pub reference_date: NaiveDate,
    pub funds: Vec<Fund>,
    /// From the first of the month through `reference_date`
    pub month_to_date: HashMap<i64, Decimal>,
    /// Everything through `reference_date`
    pub all_time: HashMap<i64, Decimal>,
    pub previous_month: HashMap<i64, Decimal>,
    pub current_total: Decimal,
    pub previous_total: Decimal,
    pub transactions_before_month: u64,
}

impl MonthSnapshot {
    pub fn load<L: Ledger + ?Sized>(
        ledger: &L,
        user_id: i64,
        reference_date: NaiveDate,
    ) -> Result<Self> {
        let funds = ledger.funds(user_id)?;
        let fund_ids: Vec<i64> = funds.iter().map(|f| f.id).collect();

        let month = DateRange::month_to_date(reference_date);
        let previous = DateRange::previous_month(reference_date);

        let snapshot = Self {
            reference_date,
            month_to_date: ledger.spend_by_fund(&fund_ids, month)?,
            all_time: ledger.spend_by_fund(&fund_ids, DateRange::through(reference_date))?,
            previous_month: ledger.spend_by_fund(&fund_ids, previous)?,
            current_total: ledger.total_spend(user_id, month)?,
            previous_total: ledger.total_spend(user_id, previous)?,
            transactions_before_month: ledger
                .transactions_before(user_id, month_start(reference_date))?,
            funds,
        };

        tracing::debug!(
            user_id,
            reference_date = %reference_date,
            funds = snapshot.funds.len(),
            current_total = %snapshot.current_total,
            "Loaded month snapshot"
        );

        Ok(snapshot)
    }

    pub fn month_spend(&self, fund_id: i64) -> Decimal {
        self.month_to_date.get(&fund_id).copied().unwrap_or_default()
    }

    /// Month-to-date spend for every enabled fund (score and alerts input)
    pub fn fund_spends(&self) -> Vec<FundSpend> {
        self.funds
            .iter()
            .map(|fund| FundSpend::new(fund.clone(), self.month_spend(fund.id)))
            .collect()
    }

    pub fn insight_inputs(&self) -> InsightInputs {
        InsightInputs {
            reference_date: self.reference_date,
            funds: self.funds.clone(),
            month_spend: self.month_to_date.clone(),
            previous_month_spend: self.previous_month.clone(),
            current_total: self.current_total,
            previous_total: self.previous_total,
            transactions_before_month: self.transactions_before_month,
        }
    }

    /// Progress rows for every budgeted fund
    ///
    /// Savings goals (non-negotiable funds with no recurrence) are measured
    /// against everything set aside so far; all other funds against the
    /// month to date.
    pub fn fund_overview(&self) -> Result<Vec<FundOverview>> {
        self.funds
            .iter()
            .filter(|f| f.is_budgeted())
            .map(|fund| {
                let spent = if fund.is_savings_goal() {
                    self.all_time.get(&fund.id).copied().unwrap_or_default()
                } else {
                    self.month_spend(fund.id)
                };
                let (progress, rolling) = fund_progress(fund, spent, self.reference_date)?;

                Ok(FundOverview {
                    fund: fund.clone(),
                    spent,
                    monthly_budget: monthly_budget(fund, self.reference_date),
                    progress,
                    rolling,
                })
            })
            .collect()
    }
}
