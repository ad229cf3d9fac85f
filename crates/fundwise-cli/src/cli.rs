//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Fundwise - Envelope budgeting with scores, alerts and monthly insights
#[derive(Parser)]
#[command(name = "fundwise")]
#[command(about = "Envelope budget engine: progress, score, alerts and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "fundwise.db", global = true)]
    pub db: PathBuf,

    /// User whose folders and funds are reported
    #[arg(long, default_value = "1", global = true)]
    pub user: i64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FUNDWISE_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Reference date for reports (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub date: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage folders
    Folders {
        #[command(subcommand)]
        action: Option<FoldersAction>,
    },

    /// Manage funds
    Funds {
        #[command(subcommand)]
        action: Option<FundsAction>,
    },

    /// Record and list transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Show per-fund progress for the current month
    Progress,

    /// Show the budget score
    Score,

    /// List budget alerts
    Alerts {
        /// Maximum number of alerts to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show monthly insights
    Insights {
        /// Ask the configured AI backend for a prose summary
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Subcommand)]
pub enum FoldersAction {
    /// Create a folder
    Add {
        /// Folder name
        name: String,
    },

    /// Rename a folder
    Rename {
        /// Folder ID
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a folder with its funds and transactions
    Delete {
        /// Folder ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum FundsAction {
    /// Create a fund
    Add {
        /// Folder the fund belongs to
        #[arg(long)]
        folder: i64,

        /// Fund name
        #[arg(long)]
        name: String,

        /// Budget per period
        #[arg(long)]
        budget: Decimal,

        /// Fund type: spending, non-negotiable
        #[arg(long = "type", default_value = "spending")]
        fund_type: String,

        /// Time mode: weekly, monthly, bimonthly, eventually
        #[arg(long, default_value = "monthly")]
        mode: String,
    },

    /// Change a fund's budget
    Budget {
        /// Fund ID
        id: i64,

        /// New budget per period
        amount: Decimal,
    },

    /// Archive a fund (excluded from every report)
    Archive {
        /// Fund ID
        id: i64,
    },

    /// Restore an archived fund
    Unarchive {
        /// Fund ID
        id: i64,
    },

    /// Delete a fund and its transactions
    Delete {
        /// Fund ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// Record a transaction dated at the reference date (--date)
    ///
    /// Negative amounts are refunds.
    Add {
        /// Fund ID
        #[arg(long)]
        fund: i64,

        /// Amount spent
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,

        /// Store ID
        #[arg(long)]
        store: Option<i64>,
    },

    /// List recent transactions
    List {
        /// Only show transactions for this fund
        #[arg(long)]
        fund: Option<i64>,

        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}
