//! Fund operations

use rusqlite::params;
use rust_decimal::Decimal;

use super::{decimal_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Fund, NewFund};

pub(crate) const FUND_COLUMNS: &str =
    "f.id, f.folder_id, f.name, f.budgeted_amount, f.fund_type, f.time_mode, f.enabled, f.created_at";

/// A fund row before its type and mode strings are validated
pub(crate) struct FundRow {
    id: i64,
    folder_id: i64,
    name: String,
    budgeted_amount: Decimal,
    fund_type: String,
    time_mode: String,
    enabled: bool,
    created_at: String,
}

impl FundRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            folder_id: row.get(1)?,
            name: row.get(2)?,
            budgeted_amount: decimal_column(row, 3)?,
            fund_type: row.get(4)?,
            time_mode: row.get(5)?,
            enabled: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    pub(crate) fn into_fund(self) -> Result<Fund> {
        Ok(Fund {
            id: self.id,
            folder_id: self.folder_id,
            name: self.name,
            budgeted_amount: self.budgeted_amount,
            fund_type: self.fund_type.parse()?,
            time_mode: self.time_mode.parse()?,
            enabled: self.enabled,
            created_at: parse_datetime(&self.created_at),
        })
    }
}

/// Convert rows, dropping funds of a disabled type
pub(crate) fn collect_funds(rows: Vec<FundRow>) -> Result<Vec<Fund>> {
    let mut funds = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match row.into_fund() {
            Ok(fund) => funds.push(fund),
            Err(Error::DisabledFundType(kind)) => {
                tracing::warn!(fund_id = id, fund_type = %kind, "Skipping fund of disabled type");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(funds)
}

fn check_budget(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "budgeted amount cannot be negative, got {}",
            amount
        )));
    }
    Ok(())
}

impl Database {
    /// Create a fund in an existing folder
    pub fn create_fund(&self, fund: &NewFund) -> Result<i64> {
        check_budget(fund.budgeted_amount)?;
        let name = fund.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("fund name cannot be empty".into()));
        }
        if self.get_folder(fund.folder_id)?.is_none() {
            return Err(Error::NotFound(format!("folder {}", fund.folder_id)));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO funds (folder_id, name, budgeted_amount, fund_type, time_mode)
             VALUES (?, ?, ?, ?, ?)",
            params![
                fund.folder_id,
                name,
                fund.budgeted_amount.normalize().to_string(),
                fund.fund_type.as_str(),
                fund.time_mode.as_str(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List all of a user's funds, archived ones included
    pub fn list_funds(&self, user_id: i64) -> Result<Vec<Fund>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM funds f
             JOIN folders d ON d.id = f.folder_id
             WHERE d.user_id = ?
             ORDER BY f.id",
            FUND_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![user_id], FundRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        collect_funds(rows)
    }

    /// Get a fund by ID
    ///
    /// Fails with `DisabledFundType` for legacy rows of a disabled type.
    pub fn get_fund(&self, id: i64) -> Result<Option<Fund>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM funds f WHERE f.id = ?", FUND_COLUMNS),
                params![id],
                FundRow::from_row,
            )
            .ok();

        row.map(FundRow::into_fund).transpose()
    }

    pub fn update_fund_budget(&self, id: i64, amount: Decimal) -> Result<()> {
        check_budget(amount)?;
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE funds SET budgeted_amount = ? WHERE id = ?",
            params![amount.normalize().to_string(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("fund {}", id)));
        }
        Ok(())
    }

    /// Archive (`false`) or restore (`true`) a fund
    pub fn set_fund_enabled(&self, id: i64, enabled: bool) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE funds SET enabled = ? WHERE id = ?",
            params![enabled, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("fund {}", id)));
        }
        Ok(())
    }

    /// Delete a fund and its transactions
    pub fn delete_fund(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM funds WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("fund {}", id)));
        }
        tracing::info!(fund_id = id, "Deleted fund");
        Ok(())
    }
}
