//! Folder operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Folder;

const FOLDER_COLUMNS: &str = "id, name, user_id, created_at";

fn row_to_folder(row: &rusqlite::Row<'_>) -> rusqlite::Result<Folder> {
    let created_at_str: String = row.get(3)?;
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    pub fn create_folder(&self, user_id: i64, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("folder name cannot be empty".into()));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO folders (name, user_id) VALUES (?, ?)",
            params![name, user_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List a user's folders by name
    pub fn list_folders(&self, user_id: i64) -> Result<Vec<Folder>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM folders WHERE user_id = ? ORDER BY name, id",
            FOLDER_COLUMNS
        ))?;

        let folders = stmt
            .query_map(params![user_id], row_to_folder)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(folders)
    }

    pub fn get_folder(&self, id: i64) -> Result<Option<Folder>> {
        let conn = self.conn()?;
        let folder = conn
            .query_row(
                &format!("SELECT {} FROM folders WHERE id = ?", FOLDER_COLUMNS),
                params![id],
                row_to_folder,
            )
            .ok();

        Ok(folder)
    }

    pub fn rename_folder(&self, id: i64, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("folder name cannot be empty".into()));
        }

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE folders SET name = ? WHERE id = ?",
            params![name, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("folder {}", id)));
        }
        Ok(())
    }

    /// Delete a folder with all of its funds and their transactions
    pub fn delete_folder(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM folders WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("folder {}", id)));
        }
        tracing::info!(folder_id = id, "Deleted folder");
        Ok(())
    }
}
