//! Spend aggregates backing the engine's `Ledger` trait

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rusqlite::params;
use rusqlite::types::Value;
use rust_decimal::Decimal;

use super::funds::{collect_funds, FundRow, FUND_COLUMNS};
use super::{decimal_column, format_date, Database};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::Fund;
use crate::period::DateRange;

/// Types the engine understands; other stored types are ignored
const ACTIVE_FUND_TYPES: &str = "('SPENDING', 'NON_NEGOTIABLE')";

/// Open-ended ranges start before any date a user could store
fn lower_bound(date: NaiveDate) -> String {
    if date.year() < 1 {
        "0000-01-01".to_string()
    } else {
        format_date(date)
    }
}

impl Ledger for Database {
    fn funds(&self, user_id: i64) -> Result<Vec<Fund>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM funds f
             JOIN folders d ON d.id = f.folder_id
             WHERE d.user_id = ? AND f.enabled = 1
             ORDER BY f.id",
            FUND_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![user_id], FundRow::from_row)?
            .collect::<std::result::Result<Vec<FundRow>, _>>()?;

        collect_funds(rows)
    }

    fn spend_by_fund(&self, fund_ids: &[i64], range: DateRange) -> Result<HashMap<i64, Decimal>> {
        let mut spend = HashMap::new();
        if fund_ids.is_empty() {
            return Ok(spend);
        }

        let placeholders = vec!["?"; fund_ids.len()].join(", ");
        let sql = format!(
            "SELECT fund_id, amount FROM transactions
             WHERE fund_id IN ({}) AND date >= ? AND date <= ?",
            placeholders
        );

        let mut values: Vec<Value> = fund_ids.iter().map(|id| Value::Integer(*id)).collect();
        values.push(Value::Text(lower_bound(range.start)));
        values.push(Value::Text(format_date(range.end)));

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, decimal_column(row, 1)?))
        })?;

        for row in rows {
            let (fund_id, amount) = row?;
            let total = spend.entry(fund_id).or_insert(Decimal::ZERO);
            *total = total.saturating_add(amount);
        }

        Ok(spend)
    }

    fn total_spend(&self, user_id: i64, range: DateRange) -> Result<Decimal> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT t.amount FROM transactions t
             JOIN funds f ON f.id = t.fund_id
             JOIN folders d ON d.id = f.folder_id
             WHERE d.user_id = ? AND f.enabled = 1 AND f.fund_type IN {}
               AND t.date >= ? AND t.date <= ?",
            ACTIVE_FUND_TYPES
        ))?;

        let amounts = stmt
            .query_map(
                params![user_id, lower_bound(range.start), format_date(range.end)],
                |row| decimal_column(row, 0),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(amounts
            .into_iter()
            .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount)))
    }

    fn transactions_before(&self, user_id: i64, date: NaiveDate) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions t
             JOIN funds f ON f.id = t.fund_id
             JOIN folders d ON d.id = f.folder_id
             WHERE d.user_id = ? AND t.date < ?",
            params![user_id, format_date(date)],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}
