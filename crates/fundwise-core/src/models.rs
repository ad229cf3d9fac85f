//! Domain models for Fundwise

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named grouping of funds owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A budget envelope with a per-period target amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    pub id: i64,
    pub folder_id: i64,
    pub name: String,
    /// Amount per period (per week for weekly funds, per half-month for
    /// bimonthly funds, and so on)
    pub budgeted_amount: Decimal,
    pub fund_type: FundType,
    pub time_mode: TimeMode,
    /// Archived funds are disabled and ignored by the engine
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Funds with a zero budget are "unbudgeted" and take no part in
    /// score, alert or health computations
    pub fn is_budgeted(&self) -> bool {
        self.budgeted_amount > Decimal::ZERO
    }

    /// Recurring funds have a month-scaled budget
    pub fn is_recurring(&self) -> bool {
        self.time_mode != TimeMode::Eventually
    }

    /// Non-negotiable funds with no recurrence accumulate toward a one-off
    /// target
    pub fn is_savings_goal(&self) -> bool {
        self.fund_type == FundType::NonNegotiable && self.time_mode == TimeMode::Eventually
    }

    /// Funds the score and alerts look at: budgeted, and either recurring
    /// or a savings goal
    pub fn is_scored(&self) -> bool {
        self.is_budgeted() && (self.is_recurring() || self.is_savings_goal())
    }
}

/// How a fund's progress is measured
///
/// Spending funds deplete as money is spent. Non-negotiable funds
/// accumulate toward a target as money is set aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundType {
    Spending,
    NonNegotiable,
}

impl FundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spending => "SPENDING",
            Self::NonNegotiable => "NON_NEGOTIABLE",
        }
    }
}

impl std::str::FromStr for FundType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "SPENDING" => Ok(Self::Spending),
            "NON_NEGOTIABLE" | "NONNEGOTIABLE" => Ok(Self::NonNegotiable),
            "TARGET" => Err(Error::DisabledFundType("TARGET".to_string())),
            _ => Err(Error::InvalidData(format!("Unknown fund type: {}", s))),
        }
    }
}

impl std::fmt::Display for FundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recurrence granularity of a fund's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    Weekly,
    Monthly,
    /// Twice a month: days 1-15 and 16-end
    Bimonthly,
    /// No recurrence; a one-off goal
    Eventually,
}

impl TimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Bimonthly => "BIMONTHLY",
            Self::Eventually => "EVENTUALLY",
        }
    }
}

impl std::str::FromStr for TimeMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "BIMONTHLY" => Ok(Self::Bimonthly),
            "EVENTUALLY" => Ok(Self::Eventually),
            _ => Err(Error::InvalidData(format!("Unknown time mode: {}", s))),
        }
    }
}

impl std::fmt::Display for TimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable ledger entry against a fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub fund_id: i64,
    pub store_id: Option<i64>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A fund to be created
#[derive(Debug, Clone)]
pub struct NewFund {
    pub folder_id: i64,
    pub name: String,
    pub budgeted_amount: Decimal,
    pub fund_type: FundType,
    pub time_mode: TimeMode,
}

/// A transaction to be recorded
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub fund_id: i64,
    pub store_id: Option<i64>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// A fund paired with the amount spent against it over some window
#[derive(Debug, Clone)]
pub struct FundSpend {
    pub fund: Fund,
    pub spent: Decimal,
}

impl FundSpend {
    pub fn new(fund: Fund, spent: Decimal) -> Self {
        Self { fund, spent }
    }
}

#[cfg(test)]
pub(crate) fn test_fund(
    id: i64,
    name: &str,
    budget: Decimal,
    fund_type: FundType,
    time_mode: TimeMode,
) -> Fund {
    Fund {
        id,
        folder_id: 1,
        name: name.to_string(),
        budgeted_amount: budget,
        fund_type,
        time_mode,
        enabled: true,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fund_type_round_trip_codes() {
        assert_eq!("SPENDING".parse::<FundType>().unwrap(), FundType::Spending);
        assert_eq!(
            "non-negotiable".parse::<FundType>().unwrap(),
            FundType::NonNegotiable
        );
        assert_eq!(FundType::NonNegotiable.to_string(), "NON_NEGOTIABLE");
    }

    #[test]
    fn test_target_fund_type_is_disabled() {
        let err = "TARGET".parse::<FundType>().unwrap_err();
        assert!(matches!(err, Error::DisabledFundType(_)));
    }

    #[test]
    fn test_time_mode_parse() {
        assert_eq!("weekly".parse::<TimeMode>().unwrap(), TimeMode::Weekly);
        assert!("fortnightly".parse::<TimeMode>().is_err());
    }

    #[test]
    fn test_fund_flags() {
        let groceries = test_fund(1, "Groceries", dec!(100), FundType::Spending, TimeMode::Weekly);
        assert!(groceries.is_budgeted());
        assert!(groceries.is_recurring());

        let trip = test_fund(2, "Trip", dec!(0), FundType::NonNegotiable, TimeMode::Eventually);
        assert!(!trip.is_budgeted());
        assert!(!trip.is_recurring());
        assert!(trip.is_savings_goal());
        assert!(!trip.is_scored());

        let car = test_fund(3, "Car", dec!(5000), FundType::NonNegotiable, TimeMode::Eventually);
        assert!(car.is_scored());

        let concert = test_fund(4, "Concert", dec!(80), FundType::Spending, TimeMode::Eventually);
        assert!(!concert.is_savings_goal());
        assert!(!concert.is_scored());
    }
}
