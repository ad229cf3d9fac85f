//! Fund command implementations

use anyhow::{bail, Context, Result};
use fundwise_core::db::Database;
use fundwise_core::models::{Fund, FundType, NewFund, TimeMode};
use rust_decimal::Decimal;
use serde_json::json;

use super::{print_json, truncate, user_folder};

/// Look up a fund and make sure its folder belongs to `user_id`
pub fn user_fund(db: &Database, user_id: i64, id: i64) -> Result<Fund> {
    let Some(fund) = db.get_fund(id)? else {
        bail!("Fund {} not found", id);
    };
    user_folder(db, user_id, fund.folder_id).with_context(|| format!("Fund {} not found", id))?;
    Ok(fund)
}

pub fn cmd_funds_list(db: &Database, user_id: i64, as_json: bool) -> Result<()> {
    let funds = db.list_funds(user_id)?;

    if as_json {
        return print_json(&json!(funds));
    }

    if funds.is_empty() {
        println!("No funds yet. Create one with:");
        println!("  fundwise funds add --folder 1 --name Groceries --budget 100 --mode weekly");
        return Ok(());
    }

    let folders = db.list_folders(user_id)?;

    println!();
    println!("💰 Funds");
    println!("   ─────────────────────────────────────────────────────────────────────");

    for folder in &folders {
        let in_folder: Vec<&Fund> = funds.iter().filter(|f| f.folder_id == folder.id).collect();
        if in_folder.is_empty() {
            continue;
        }

        println!("   📁 {}", folder.name);
        for fund in in_folder {
            println!(
                "   {:>4} │ {:24} │ {:>10.2} │ {:10} │ {:14}{}",
                fund.id,
                truncate(&fund.name, 24),
                fund.budgeted_amount,
                fund.time_mode.as_str().to_lowercase(),
                fund.fund_type.as_str().to_lowercase(),
                if fund.enabled { "" } else { " (archived)" }
            );
        }
    }

    Ok(())
}

pub fn cmd_funds_add(
    db: &Database,
    user_id: i64,
    folder_id: i64,
    name: &str,
    budget: Decimal,
    fund_type: &str,
    mode: &str,
) -> Result<()> {
    user_folder(db, user_id, folder_id)?;

    let fund_type: FundType = fund_type
        .parse()
        .with_context(|| format!("Invalid --type '{}' (use spending or non-negotiable)", fund_type))?;
    let time_mode: TimeMode = mode.parse().with_context(|| {
        format!(
            "Invalid --mode '{}' (use weekly, monthly, bimonthly or eventually)",
            mode
        )
    })?;

    let id = db
        .create_fund(&NewFund {
            folder_id,
            name: name.to_string(),
            budgeted_amount: budget,
            fund_type,
            time_mode,
        })
        .with_context(|| format!("Failed to create fund '{}'", name))?;

    tracing::debug!(fund_id = id, folder_id, %fund_type, %time_mode, "Created fund");
    println!(
        "✅ Created fund '{}' (ID: {}) with {:.2} per {} period",
        name.trim(),
        id,
        budget,
        time_mode.as_str().to_lowercase()
    );
    Ok(())
}

pub fn cmd_funds_budget(db: &Database, user_id: i64, id: i64, amount: Decimal) -> Result<()> {
    let fund = user_fund(db, user_id, id)?;
    db.update_fund_budget(id, amount)
        .with_context(|| format!("Failed to update budget of fund {}", id))?;
    println!(
        "✅ '{}' budget: {:.2} → {:.2}",
        fund.name, fund.budgeted_amount, amount
    );
    Ok(())
}

pub fn cmd_funds_archive(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let fund = user_fund(db, user_id, id)?;
    db.set_fund_enabled(id, false)?;
    println!("📦 Archived fund '{}'", fund.name);
    Ok(())
}

pub fn cmd_funds_unarchive(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let fund = user_fund(db, user_id, id)?;
    db.set_fund_enabled(id, true)?;
    println!("✅ Restored fund '{}'", fund.name);
    Ok(())
}

pub fn cmd_funds_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let fund = user_fund(db, user_id, id)?;
    db.delete_fund(id)
        .with_context(|| format!("Failed to delete fund {}", id))?;
    println!("🗑️  Deleted fund '{}' and its transactions", fund.name);
    Ok(())
}
