//! Transaction command implementations

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use fundwise_core::db::Database;
use fundwise_core::models::NewTransaction;
use rust_decimal::Decimal;
use serde_json::json;

use super::{print_json, truncate, user_fund};

pub fn cmd_transactions_add(
    db: &Database,
    user_id: i64,
    fund_id: i64,
    amount: Decimal,
    date: NaiveDate,
    note: Option<&str>,
    store_id: Option<i64>,
) -> Result<()> {
    let fund = user_fund(db, user_id, fund_id)?;

    let id = db
        .insert_transaction(&NewTransaction {
            fund_id,
            store_id,
            amount,
            date,
            note: note.map(str::to_string),
        })
        .with_context(|| format!("Failed to record transaction for fund {}", fund_id))?;

    if amount < Decimal::ZERO {
        println!(
            "✅ Recorded refund of {:.2} to '{}' on {} (ID: {})",
            amount.abs(),
            fund.name,
            date,
            id
        );
    } else {
        println!(
            "✅ Recorded {:.2} against '{}' on {} (ID: {})",
            amount, fund.name, date, id
        );
    }
    Ok(())
}

pub fn cmd_transactions_list(
    db: &Database,
    user_id: i64,
    fund_id: Option<i64>,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    if let Some(id) = fund_id {
        user_fund(db, user_id, id)?;
    }

    let names: HashMap<i64, String> = db
        .list_funds(user_id)?
        .into_iter()
        .map(|f| (f.id, f.name))
        .collect();

    // Storage lists across users, so scope to this user's funds here
    let transactions: Vec<_> = db
        .list_transactions(fund_id, usize::MAX)?
        .into_iter()
        .filter(|tx| names.contains_key(&tx.fund_id))
        .take(limit)
        .collect();

    if as_json {
        return print_json(&json!(transactions));
    }

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  fundwise transactions add --fund 1 --amount 12.50");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.amount < Decimal::ZERO {
            format!("\x1b[32m+{:.2}\x1b[0m", tx.amount.abs()) // Green for refunds
        } else {
            format!("{:.2}", tx.amount)
        };
        let fund_name = names.get(&tx.fund_id).map(String::as_str).unwrap_or("?");

        println!(
            "   {:>5} │ {} │ {:>10} │ {:20} │ {}",
            tx.id,
            tx.date,
            amount_str,
            truncate(fund_name, 20),
            truncate(tx.note.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let Some(tx) = db.get_transaction(id)? else {
        bail!("Transaction {} not found", id);
    };
    user_fund(db, user_id, tx.fund_id).with_context(|| format!("Transaction {} not found", id))?;

    db.delete_transaction(id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    println!("🗑️  Deleted transaction {} ({:.2} on {})", id, tx.amount, tx.date);
    Ok(())
}
