//! Folder command implementations

use anyhow::{bail, Context, Result};
use fundwise_core::db::Database;
use fundwise_core::models::Folder;
use serde_json::json;

use super::{print_json, truncate};

/// Look up a folder and make sure it belongs to `user_id`
pub fn user_folder(db: &Database, user_id: i64, id: i64) -> Result<Folder> {
    match db.get_folder(id)? {
        Some(folder) if folder.user_id == user_id => Ok(folder),
        _ => bail!("Folder {} not found", id),
    }
}

pub fn cmd_folders_list(db: &Database, user_id: i64, as_json: bool) -> Result<()> {
    let folders = db.list_folders(user_id)?;
    let funds = db.list_funds(user_id)?;

    if as_json {
        return print_json(&json!(folders));
    }

    if folders.is_empty() {
        println!("No folders yet. Create one with:");
        println!("  fundwise folders add Essentials");
        return Ok(());
    }

    println!();
    println!("📁 Folders");
    println!("   ─────────────────────────────────────────────");

    for folder in folders {
        let fund_count = funds.iter().filter(|f| f.folder_id == folder.id).count();
        println!(
            "   {:>4} │ {:30} │ {} funds",
            folder.id,
            truncate(&folder.name, 30),
            fund_count
        );
    }

    Ok(())
}

pub fn cmd_folders_add(db: &Database, user_id: i64, name: &str) -> Result<()> {
    let id = db
        .create_folder(user_id, name)
        .with_context(|| format!("Failed to create folder '{}'", name))?;
    println!("✅ Created folder '{}' (ID: {})", name.trim(), id);
    Ok(())
}

pub fn cmd_folders_rename(db: &Database, user_id: i64, id: i64, name: &str) -> Result<()> {
    let folder = user_folder(db, user_id, id)?;
    db.rename_folder(id, name)
        .with_context(|| format!("Failed to rename folder {}", id))?;
    println!("✅ Renamed folder '{}' to '{}'", folder.name, name.trim());
    Ok(())
}

pub fn cmd_folders_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let folder = user_folder(db, user_id, id)?;
    db.delete_folder(id)
        .with_context(|| format!("Failed to delete folder {}", id))?;
    println!(
        "🗑️  Deleted folder '{}' with its funds and transactions",
        folder.name
    );
    Ok(())
}
