//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define store contracts for the food library and the daily log.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes validate caller input before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`FoodNotFound`) in addition
//!   to DB transport errors.

pub mod library_repo;
pub mod log_repo;
pub mod user_repo;

use crate::db::migrations::latest_version;
use crate::repo::library_repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Expected table shape checked by repository constructors.
pub(crate) struct RequiredTable {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

/// Verifies schema version and required tables before handing out a
/// repository over the connection.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[RequiredTable],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(RepoError::from)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for shape in required {
        if !table_exists(conn, shape.table)? {
            return Err(RepoError::MissingRequiredTable(shape.table));
        }
        for column in shape.columns {
            if !table_has_column(conn, shape.table, column)? {
                return Err(RepoError::MissingRequiredColumn {
                    table: shape.table,
                    column,
                });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
