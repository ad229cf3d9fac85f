//! Fundwise Core Library
//!
//! Budget and insights calculation engine for the Fundwise envelope
//! budgeting app:
//! - Period resolution for weekly, monthly, bimonthly and one-off funds
//! - Per-period and rolling progress allocation
//! - Budget score, budget alerts and monthly insights
//! - SQLite ledger (SQLCipher encrypted) behind the `Ledger` trait
//! - Optional AI prose summaries from a local model
//!
//! Every engine function is pure and synchronous over a [`MonthSnapshot`]
//! of ledger aggregates.

pub mod ai;
pub mod alerts;
pub mod amounts;
pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod period;
pub mod progress;
pub mod score;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIClient, MockBackend, MonthSummary, OllamaBackend, SummaryBackend};
pub use alerts::{
    budget_alerts, budget_alerts_with_config, top_alerts, AlertSeverity, AlertType, BudgetAlert,
};
pub use config::{AlertConfig, EngineConfig, InsightConfig, ScoreConfig, SummaryConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use insights::{generate_summary, monthly_stats, monthly_stats_with_config, MonthlyStats};
pub use ledger::{FundOverview, Ledger, MonthSnapshot};
pub use models::{Folder, Fund, FundSpend, FundType, NewFund, NewTransaction, TimeMode, Transaction};
pub use period::{current_period_index, monthly_budget, period_count, DateRange};
pub use progress::{
    allocate_progress, fund_progress, rolling_progress, ProgressResult, RollingProgressResult,
};
pub use score::{budget_score, budget_score_with_config, BudgetScore, ScoreFactor, ScoreStatus};
