//! Fundwise CLI - Envelope budgeting from the terminal
//!
//! Usage:
//!   fundwise init                                  Initialize database
//!   fundwise funds add --folder 1 --name Rent ...  Create a fund
//!   fundwise transactions add --fund 1 --amount 9  Record spending
//!   fundwise insights --summary                    Monthly insights

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use fundwise_core::{AIClient, EngineConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let user = cli.user;
    let date = commands::resolve_date(cli.date.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Folders { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_folders_list(&db, user, cli.json),
                Some(FoldersAction::Add { name }) => commands::cmd_folders_add(&db, user, &name),
                Some(FoldersAction::Rename { id, name }) => {
                    commands::cmd_folders_rename(&db, user, id, &name)
                }
                Some(FoldersAction::Delete { id }) => commands::cmd_folders_delete(&db, user, id),
            }
        }
        Commands::Funds { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_funds_list(&db, user, cli.json),
                Some(FundsAction::Add {
                    folder,
                    name,
                    budget,
                    fund_type,
                    mode,
                }) => commands::cmd_funds_add(&db, user, folder, &name, budget, &fund_type, &mode),
                Some(FundsAction::Budget { id, amount }) => {
                    commands::cmd_funds_budget(&db, user, id, amount)
                }
                Some(FundsAction::Archive { id }) => commands::cmd_funds_archive(&db, user, id),
                Some(FundsAction::Unarchive { id }) => {
                    commands::cmd_funds_unarchive(&db, user, id)
                }
                Some(FundsAction::Delete { id }) => commands::cmd_funds_delete(&db, user, id),
            }
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, user, None, 20, cli.json),
                Some(TransactionsAction::Add {
                    fund,
                    amount,
                    note,
                    store,
                }) => commands::cmd_transactions_add(
                    &db,
                    user,
                    fund,
                    amount,
                    date,
                    note.as_deref(),
                    store,
                ),
                Some(TransactionsAction::List { fund, limit }) => {
                    commands::cmd_transactions_list(&db, user, fund, limit, cli.json)
                }
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, user, id)
                }
            }
        }
        Commands::Progress => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_progress(&db, user, date, cli.json)
        }
        Commands::Score => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = EngineConfig::load().context("Failed to load engine config")?;
            commands::cmd_score(&db, user, date, &config, cli.json)
        }
        Commands::Alerts { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = EngineConfig::load().context("Failed to load engine config")?;
            commands::cmd_alerts(&db, user, date, limit, &config, cli.json)
        }
        Commands::Insights { summary } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = EngineConfig::load().context("Failed to load engine config")?;

            let ai = if summary {
                let client = AIClient::from_env();
                if client.is_none() && !cli.json {
                    println!("💡 Tip: Set OLLAMA_HOST to enable prose summaries");
                }
                client
            } else {
                None
            };

            commands::cmd_insights(&db, user, date, ai.as_ref(), &config, cli.json).await
        }
    }
}
