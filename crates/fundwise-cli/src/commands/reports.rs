//! Report command implementations
//!
//! Every report loads one [`MonthSnapshot`] for the reference date and
//! runs the engine over it. `--json` prints the engine result as-is.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fundwise_core::ai::{AIClient, MonthSummary, SummaryBackend};
use fundwise_core::alerts::{budget_alerts_with_config, top_alerts, AlertType};
use fundwise_core::config::EngineConfig;
use fundwise_core::db::Database;
use fundwise_core::insights::{generate_summary, monthly_stats_with_config, MonthlyStats};
use fundwise_core::ledger::MonthSnapshot;
use fundwise_core::period::{current_period_index, period_count};
use fundwise_core::score::{budget_score_with_config, ScoreStatus};
use rust_decimal::Decimal;
use serde_json::json;

use super::{print_json, truncate};

const BAR_WIDTH: usize = 8;

pub fn load_snapshot(db: &Database, user_id: i64, date: NaiveDate) -> Result<MonthSnapshot> {
    MonthSnapshot::load(db, user_id, date)
        .with_context(|| format!("Failed to load ledger for {}", date))
}

/// Render a 0..=1 ratio as a fixed-width block bar
fn render_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn human(label: &str) -> String {
    label.replace('_', " ")
}

pub fn cmd_progress(db: &Database, user_id: i64, date: NaiveDate, as_json: bool) -> Result<()> {
    let snapshot = load_snapshot(db, user_id, date)?;
    let overview = snapshot
        .fund_overview()
        .context("Failed to compute fund progress")?;

    if as_json {
        return print_json(&json!(overview));
    }

    println!();
    println!("📈 Fund Progress ({})", date.format("%B %Y"));
    println!("   As of {}", date);
    println!("   ─────────────────────────────────────────────────────────────");

    if overview.is_empty() {
        println!("   No budgeted funds. Add one with: fundwise funds add");
        return Ok(());
    }

    for row in overview {
        let fund = &row.fund;
        let current = current_period_index(fund.time_mode, date) as usize;
        let count = period_count(fund.time_mode, date);

        println!(
            "   {:24} {:>10.2} / {:<10.2} {}",
            truncate(&fund.name, 24),
            row.spent,
            row.monthly_budget,
            human(&fund.time_mode.as_str().to_lowercase())
        );

        let bars: Vec<String> = row
            .progress
            .progress_bars
            .iter()
            .enumerate()
            .map(|(i, ratio)| {
                if count > 1 && i == current {
                    format!("[{}]", render_bar(*ratio))
                } else {
                    format!(" {} ", render_bar(*ratio))
                }
            })
            .collect();
        println!("   {}", bars.join(""));

        let mut notes = vec![format!(
            "now {:.0}%",
            row.rolling.progress * 100.0
        )];
        if row.progress.overspent_ratio > 0.0 {
            notes.push(format!(
                "\x1b[31moverspent {:.0}%\x1b[0m",
                row.progress.overspent_ratio * 100.0
            ));
        }
        if row.progress.overfunded_ratio > 0.0 {
            notes.push(format!(
                "overfunded {:.0}%",
                row.progress.overfunded_ratio * 100.0
            ));
        }
        println!("   {}", notes.join(" · "));
    }

    Ok(())
}

pub fn cmd_score(
    db: &Database,
    user_id: i64,
    date: NaiveDate,
    config: &EngineConfig,
    as_json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(db, user_id, date)?;
    let score = budget_score_with_config(&snapshot.fund_spends(), &config.score);

    if as_json {
        return print_json(&json!(score));
    }

    let icon = match score.status {
        ScoreStatus::OnTrack => "✅",
        ScoreStatus::NeedsAttention => "⚠️ ",
        ScoreStatus::OverBudget => "🚨",
    };

    println!();
    println!("🏆 Budget Score ({})", date.format("%B %Y"));
    println!("   ─────────────────────────────");
    println!(
        "   {} {}/100 ({})",
        icon,
        score.score,
        human(score.status.as_str())
    );

    if !score.factors.is_empty() {
        println!();
        for factor in &score.factors {
            println!("   {:>+4} │ {}", factor.points, factor.description);
        }
    }

    Ok(())
}

pub fn cmd_alerts(
    db: &Database,
    user_id: i64,
    date: NaiveDate,
    limit: Option<usize>,
    config: &EngineConfig,
    as_json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(db, user_id, date)?;
    let mut alerts = budget_alerts_with_config(&snapshot.fund_spends(), &config.alerts);
    if let Some(limit) = limit {
        alerts = top_alerts(alerts, limit);
    }

    if as_json {
        return print_json(&json!(alerts));
    }

    if alerts.is_empty() {
        println!("✅ No budget alerts. Every fund is under {:.0}%.", config.alerts.threshold_percent);
        return Ok(());
    }

    println!();
    println!("🔔 Budget Alerts ({})", alerts.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in alerts {
        let (icon, detail) = match alert.alert_type {
            AlertType::OverBudget => (
                "🔴",
                format!("over by {:.2}", alert.overage.unwrap_or_default()),
            ),
            AlertType::AlmostOver => (
                "🟡",
                format!("{:.2} left", alert.remaining.unwrap_or_default()),
            ),
        };

        println!(
            "   {} {:24} │ {:>5.0}% │ {:>10.2} / {:<10.2} │ {}",
            icon,
            truncate(&alert.fund_name, 24),
            alert.utilization,
            alert.spent,
            alert.budget,
            detail
        );
    }

    Ok(())
}

/// Ask `client` for a prose summary, giving up after `timeout`
///
/// Returns None without sending a prompt when the backend fails its
/// health check.
pub async fn summarize(
    client: &AIClient,
    stats: &MonthlyStats,
    timeout: std::time::Duration,
) -> Option<MonthSummary> {
    if !client.health_check().await {
        tracing::warn!(
            host = client.host(),
            model = client.model(),
            "AI backend unreachable, skipping monthly summary"
        );
        return None;
    }

    match tokio::time::timeout(timeout, generate_summary(Some(client), stats)).await {
        Ok(summary) => summary,
        Err(_) => {
            tracing::warn!(
                month = %stats.month,
                timeout_secs = timeout.as_secs(),
                model = client.model(),
                "Monthly summary timed out"
            );
            None
        }
    }
}

/// Monthly insights, with an optional prose summary when `ai` is set
pub async fn cmd_insights(
    db: &Database,
    user_id: i64,
    date: NaiveDate,
    ai: Option<&AIClient>,
    config: &EngineConfig,
    as_json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(db, user_id, date)?;
    let stats = monthly_stats_with_config(&snapshot.insight_inputs(), &config.insights);

    let summary = match ai {
        Some(client) => summarize(client, &stats, config.summary.timeout).await,
        None => None,
    };

    if as_json {
        return print_json(&json!({
            "stats": stats,
            "summary": summary,
        }));
    }

    print_stats(&stats);

    if let Some(summary) = summary {
        println!();
        println!("🤖 Summary ({})", summary.model);
        println!("   {}", summary.summary);
        for highlight in &summary.highlights {
            println!("   • {}", highlight);
        }
    } else if let Some(client) = ai {
        println!();
        println!(
            "   💡 Tip: Summary unavailable. Check that {} is reachable.",
            client.host()
        );
    }

    Ok(())
}

fn print_stats(stats: &MonthlyStats) {
    let health = &stats.envelope_health;
    let comparison = &stats.month_comparison;

    println!();
    println!("📊 Monthly Insights ({})", stats.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total spending: {:.2}", stats.total_spending);

    if comparison.is_first_month {
        println!("   First month of history, nothing to compare yet");
    } else {
        let arrow = if comparison.percentage_change > 0.0 {
            "📈"
        } else if comparison.percentage_change < 0.0 {
            "📉"
        } else {
            "➡️ "
        };
        println!(
            "   {} {:+.1}% vs last month ({:.2})",
            arrow, comparison.percentage_change, comparison.previous_total
        );
    }

    println!();
    println!(
        "   Envelopes: ✅ {} on track │ ⚠️  {} at risk │ 🔴 {} overspent",
        health.on_track, health.at_risk, health.overspent
    );

    if let Some(over) = &stats.top_overspent {
        println!(
            "   Most overspent: {} ({:.2} over, {:.0}%)",
            over.fund_name, over.amount, over.utilization
        );
    }
    if let Some(left) = &stats.top_leftover {
        println!(
            "   Most left over: {} ({:.2} remaining)",
            left.fund_name, left.amount
        );
    }

    if !stats.spending_breakdown.is_empty() {
        println!();
        println!("   {:24} │ {:>10} │ {:>6}", "Fund", "Amount", "%");
        println!("   ─────────────────────────┼────────────┼───────");
        for entry in &stats.spending_breakdown {
            println!(
                "   {:24} │ {:>10.2} │ {:>5.1}%",
                truncate(&entry.fund_name, 24),
                entry.amount,
                entry.percentage
            );
        }
    }

    if let Some(suggestion) = &stats.suggestion {
        println!();
        println!("   💡 {}", suggestion.message);
    }

    if stats.total_spending == Decimal::ZERO && stats.spending_breakdown.is_empty() {
        println!();
        println!("   No spending recorded this month yet.");
    }
}
