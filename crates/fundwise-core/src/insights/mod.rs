//! Monthly insights
//!
//! Turns one month of ledger aggregates into a deterministic summary:
//!
//! - **Envelope health** - on track / at risk / overspent counts for
//!   recurring budgeted funds
//! - **Highlights** - the most overspent fund and the fund with the most
//!   budget left
//! - **Month comparison** - total spend against last month
//! - **Spending breakdown** - top funds by spend plus an "Other" bucket
//! - **Suggestion** - at most one rule-based nudge
//!
//! An optional prose summary can be generated from the result by an AI
//! backend. It never feeds back into the numbers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fundwise_core::insights::monthly_stats;
//! use fundwise_core::ledger::MonthSnapshot;
//!
//! let snapshot = MonthSnapshot::load(&db, user_id, today)?;
//! let stats = monthly_stats(&snapshot.insight_inputs());
//! ```

mod breakdown;
mod engine;
mod health;
mod suggestion;
mod summary;
pub mod types;

pub use breakdown::spending_breakdown;
pub use engine::{month_comparison, monthly_stats, monthly_stats_with_config};
pub use health::{classify, envelope_health, fund_health, top_leftover, top_overspent};
pub use suggestion::suggestion;
pub use summary::generate_summary;
pub use types::{
    BreakdownEntry, EnvelopeHealth, FundHealth, HealthStatus, HighlightFund, InsightInputs,
    MonthComparison, MonthlyStats, Suggestion, SuggestionType, OTHER_FUND_ID,
};
