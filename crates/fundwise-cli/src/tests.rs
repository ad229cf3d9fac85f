//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use fundwise_core::db::Database;
use fundwise_core::models::{FundType, TimeMode};
use fundwise_core::{monthly_stats_with_config, AIClient, EngineConfig, MockBackend};
use rust_decimal_macros::dec;

use crate::commands::{self, truncate};

const USER: i64 = 1;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// A folder with a weekly groceries fund and a monthly dining fund,
/// returning (folder_id, groceries_id, dining_id)
fn setup_budget(db: &Database) -> (i64, i64, i64) {
    commands::cmd_folders_add(db, USER, "Essentials").unwrap();
    let folder = db.list_folders(USER).unwrap()[0].id;

    commands::cmd_funds_add(db, USER, folder, "Groceries", dec!(100), "spending", "weekly").unwrap();
    commands::cmd_funds_add(db, USER, folder, "Dining", dec!(150), "spending", "monthly").unwrap();

    let funds = db.list_funds(USER).unwrap();
    let id_of = |name: &str| funds.iter().find(|f| f.name == name).unwrap().id;
    (folder, id_of("Groceries"), id_of("Dining"))
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fundwise.db");

    let result = commands::cmd_init(&path, true);
    assert!(result.is_ok());
    assert!(path.exists());

    let db = commands::open_db(&path, true).unwrap();
    assert!(db.list_folders(USER).unwrap().is_empty());
}

#[test]
fn test_resolve_date() {
    assert_eq!(
        commands::resolve_date(Some("2024-06-14")).unwrap(),
        date(2024, 6, 14)
    );
    assert!(commands::resolve_date(Some("06/14/2024")).is_err());
    assert!(commands::resolve_date(None).is_ok());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
    assert_eq!(truncate("Weekend getaway fund", 10), "Weekend...");
    assert_eq!(truncate("Café crème", 8), "Café ...");
}

// ========== Folder Command Tests ==========

#[test]
fn test_cmd_folders_crud() {
    let db = setup_test_db();

    commands::cmd_folders_add(&db, USER, "Home").unwrap();
    let id = db.list_folders(USER).unwrap()[0].id;

    assert!(commands::cmd_folders_list(&db, USER, false).is_ok());
    assert!(commands::cmd_folders_list(&db, USER, true).is_ok());

    commands::cmd_folders_rename(&db, USER, id, "House").unwrap();
    assert_eq!(db.get_folder(id).unwrap().unwrap().name, "House");

    commands::cmd_folders_delete(&db, USER, id).unwrap();
    assert!(db.list_folders(USER).unwrap().is_empty());
}

#[test]
fn test_cmd_folders_add_blank_name() {
    let db = setup_test_db();
    assert!(commands::cmd_folders_add(&db, USER, "   ").is_err());
}

#[test]
fn test_cmd_folders_other_user() {
    let db = setup_test_db();
    let theirs = db.create_folder(2, "Theirs").unwrap();

    let result = commands::cmd_folders_rename(&db, USER, theirs, "Mine");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
    assert!(commands::cmd_folders_delete(&db, USER, theirs).is_err());
    assert_eq!(db.get_folder(theirs).unwrap().unwrap().name, "Theirs");
}

// ========== Fund Command Tests ==========

#[test]
fn test_cmd_funds_add_parses_type_and_mode() {
    let db = setup_test_db();
    let (folder, _, _) = setup_budget(&db);

    commands::cmd_funds_add(&db, USER, folder, "Rent", dec!(1200), "non-negotiable", "Bimonthly")
        .unwrap();

    let rent = db
        .list_funds(USER)
        .unwrap()
        .into_iter()
        .find(|f| f.name == "Rent")
        .unwrap();
    assert_eq!(rent.fund_type, FundType::NonNegotiable);
    assert_eq!(rent.time_mode, TimeMode::Bimonthly);
    assert_eq!(rent.budgeted_amount, dec!(1200));
}

#[test]
fn test_cmd_funds_add_rejects_bad_input() {
    let db = setup_test_db();
    let (folder, _, _) = setup_budget(&db);

    let result = commands::cmd_funds_add(&db, USER, folder, "Goal", dec!(10), "target", "monthly");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid --type"));

    let result = commands::cmd_funds_add(&db, USER, folder, "Goal", dec!(10), "spending", "daily");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid --mode"));

    assert!(commands::cmd_funds_add(&db, USER, folder, "Goal", dec!(-1), "spending", "monthly").is_err());
    assert!(commands::cmd_funds_add(&db, USER, 999, "Goal", dec!(10), "spending", "monthly").is_err());

    assert_eq!(db.list_funds(USER).unwrap().len(), 2);
}

#[test]
fn test_cmd_funds_budget_archive_delete() {
    let db = setup_test_db();
    let (_, groceries, dining) = setup_budget(&db);

    commands::cmd_funds_budget(&db, USER, groceries, dec!(120)).unwrap();
    assert_eq!(
        db.get_fund(groceries).unwrap().unwrap().budgeted_amount,
        dec!(120)
    );

    commands::cmd_funds_archive(&db, USER, dining).unwrap();
    assert!(!db.get_fund(dining).unwrap().unwrap().enabled);
    assert!(commands::cmd_funds_list(&db, USER, false).is_ok());

    commands::cmd_funds_unarchive(&db, USER, dining).unwrap();
    assert!(db.get_fund(dining).unwrap().unwrap().enabled);

    commands::cmd_funds_delete(&db, USER, dining).unwrap();
    assert!(db.get_fund(dining).unwrap().is_none());
    assert!(commands::cmd_funds_delete(&db, USER, dining).is_err());
}

#[test]
fn test_cmd_funds_list_skips_disabled_fund_types() {
    let db = setup_test_db();
    let (folder, _, _) = setup_budget(&db);

    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO funds (folder_id, name, budgeted_amount, fund_type, time_mode) VALUES (?1, 'Legacy', '50', 'TARGET', 'MONTHLY')",
        rusqlite::params![folder],
    )
    .unwrap();
    drop(conn);

    assert!(commands::cmd_funds_list(&db, USER, true).is_ok());
    assert_eq!(db.list_funds(USER).unwrap().len(), 2);
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_transactions_add_and_list() {
    let db = setup_test_db();
    let (_, groceries, dining) = setup_budget(&db);

    commands::cmd_transactions_add(
        &db,
        USER,
        groceries,
        dec!(42.50),
        date(2024, 6, 3),
        Some("market"),
        Some(7),
    )
    .unwrap();
    commands::cmd_transactions_add(&db, USER, dining, dec!(-5), date(2024, 6, 4), None, None)
        .unwrap();

    let all = db.list_transactions(None, 10).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].amount, dec!(-5));
    assert_eq!(all[1].note.as_deref(), Some("market"));
    assert_eq!(all[1].store_id, Some(7));

    assert!(commands::cmd_transactions_list(&db, USER, None, 20, false).is_ok());
    assert!(commands::cmd_transactions_list(&db, USER, Some(groceries), 1, true).is_ok());
    assert!(commands::cmd_transactions_list(&db, USER, Some(999), 20, false).is_err());
}

#[test]
fn test_cmd_transactions_other_user() {
    let db = setup_test_db();
    setup_budget(&db);

    let theirs = db.create_folder(2, "Theirs").unwrap();
    commands::cmd_funds_add(&db, 2, theirs, "Food", dec!(10), "spending", "monthly").unwrap();
    let their_fund = db.list_funds(2).unwrap()[0].id;
    commands::cmd_transactions_add(&db, 2, their_fund, dec!(3), date(2024, 6, 1), None, None)
        .unwrap();
    let their_tx = db.list_transactions(Some(their_fund), 1).unwrap()[0].id;

    assert!(
        commands::cmd_transactions_add(&db, USER, their_fund, dec!(1), date(2024, 6, 1), None, None)
            .is_err()
    );
    assert!(commands::cmd_transactions_delete(&db, USER, their_tx).is_err());
    assert!(db.get_transaction(their_tx).unwrap().is_some());

    commands::cmd_transactions_delete(&db, 2, their_tx).unwrap();
    assert!(db.get_transaction(their_tx).unwrap().is_none());
}

// ========== Report Tests ==========

fn setup_june(db: &Database) -> (i64, i64) {
    let (_, groceries, dining) = setup_budget(db);
    for (fund, amount, day) in [
        (dining, dec!(200), 15),
        (groceries, dec!(60), 3),
        (groceries, dec!(70), 10),
        (dining, dec!(180), 12),
    ] {
        let month = if day == 15 { 5 } else { 6 };
        commands::cmd_transactions_add(db, USER, fund, amount, date(2024, month, day), None, None)
            .unwrap();
    }
    (groceries, dining)
}

#[test]
fn test_cmd_progress() {
    let db = setup_test_db();
    setup_june(&db);

    assert!(commands::cmd_progress(&db, USER, date(2024, 6, 14), false).is_ok());
    assert!(commands::cmd_progress(&db, USER, date(2024, 6, 14), true).is_ok());
}

#[test]
fn test_cmd_progress_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_progress(&db, USER, date(2024, 6, 14), false).is_ok());
}

#[test]
fn test_cmd_score_and_alerts() {
    let db = setup_test_db();
    setup_june(&db);
    let config = EngineConfig::default();

    assert!(commands::cmd_score(&db, USER, date(2024, 6, 14), &config, false).is_ok());
    assert!(commands::cmd_score(&db, USER, date(2024, 6, 14), &config, true).is_ok());
    assert!(commands::cmd_alerts(&db, USER, date(2024, 6, 14), None, &config, false).is_ok());
    assert!(commands::cmd_alerts(&db, USER, date(2024, 6, 14), Some(1), &config, true).is_ok());
}

#[test]
fn test_load_snapshot_matches_ledger() {
    let db = setup_test_db();
    let (groceries, dining) = setup_june(&db);

    let snapshot = commands::load_snapshot(&db, USER, date(2024, 6, 14)).unwrap();
    assert_eq!(snapshot.month_spend(groceries), dec!(130));
    assert_eq!(snapshot.month_spend(dining), dec!(180));
    assert_eq!(snapshot.current_total, dec!(310));
    assert_eq!(snapshot.previous_total, dec!(200));
}

#[tokio::test]
async fn test_cmd_insights_without_summary() {
    let db = setup_test_db();
    setup_june(&db);
    let config = EngineConfig::default();

    let result = commands::cmd_insights(&db, USER, date(2024, 6, 14), None, &config, false).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_insights_with_mock_summary() {
    let db = setup_test_db();
    setup_june(&db);
    let config = EngineConfig::default();
    let ai = AIClient::mock();

    let result =
        commands::cmd_insights(&db, USER, date(2024, 6, 14), Some(&ai), &config, true).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_insights_unreachable_backend_still_reports() {
    let db = setup_test_db();
    setup_june(&db);
    let config = EngineConfig::default();
    // Nothing listens on port 9 locally
    let ai = AIClient::ollama("http://127.0.0.1:9", "llama3.2");

    let result =
        commands::cmd_insights(&db, USER, date(2024, 6, 14), Some(&ai), &config, false).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_summarize_skips_unhealthy_backend() {
    let db = setup_test_db();
    setup_june(&db);
    let config = EngineConfig::default();
    let snapshot = commands::load_snapshot(&db, USER, date(2024, 6, 14)).unwrap();
    let stats = monthly_stats_with_config(&snapshot.insight_inputs(), &config.insights);

    let healthy = AIClient::mock();
    let summary = commands::summarize(&healthy, &stats, config.summary.timeout).await;
    assert_eq!(summary.unwrap().model, "mock");

    let unhealthy = AIClient::Mock(MockBackend::unhealthy());
    let summary = commands::summarize(&unhealthy, &stats, config.summary.timeout).await;
    assert!(summary.is_none());

    let result =
        commands::cmd_insights(&db, USER, date(2024, 6, 14), Some(&unhealthy), &config, true)
            .await;
    assert!(result.is_ok());
}
