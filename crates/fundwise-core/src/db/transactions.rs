//! Transaction operations

use rusqlite::{params, OptionalExtension};

use super::{date_column, decimal_column, format_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let created_at_str: String = row.get(6)?;
    Ok(Transaction {
        id: row.get(0)?,
        fund_id: row.get(1)?,
        store_id: row.get(2)?,
        amount: decimal_column(row, 3)?,
        date: date_column(row, 4)?,
        note: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Record a transaction against an existing fund
    ///
    /// Negative amounts are refunds.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        let fund_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM funds WHERE id = ?)",
            params![tx.fund_id],
            |row| row.get(0),
        )?;
        if !fund_exists {
            return Err(Error::NotFound(format!("fund {}", tx.fund_id)));
        }

        conn.execute(
            "INSERT INTO transactions (fund_id, store_id, amount, date, note)
             VALUES (?, ?, ?, ?, ?)",
            params![
                tx.fund_id,
                tx.store_id,
                tx.amount.normalize().to_string(),
                format_date(tx.date),
                tx.note.as_deref(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent transactions first, optionally for a single fund
    pub fn list_transactions(&self, fund_id: Option<i64>, limit: usize) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(
            "SELECT id, fund_id, store_id, amount, date, note, created_at
             FROM transactions
             WHERE (?1 IS NULL OR fund_id = ?1)
             ORDER BY date DESC, id DESC
             LIMIT ?2",
        )?;

        let transactions = stmt
            .query_map(params![fund_id, limit], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                "SELECT id, fund_id, store_id, amount, date, note, created_at
                 FROM transactions WHERE id = ?",
                params![id],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }
}
