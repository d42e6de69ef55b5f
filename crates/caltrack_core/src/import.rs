//! Bulk food library import entry point.
//!
//! # Responsibility
//! - Accept pre-parsed rows from an external tabular source and insert
//!   them into one user's food library in a single transaction.
//!
//! # Invariants
//! - Rows are append-only; an existing `(user_id, food_name)` pair is
//!   skipped, never overwritten.
//! - No row-level validation beyond the storage constraints; parsing
//!   and column mapping are the collaborator's job.

use crate::model::user::UserId;
use crate::repo::ensure_connection_ready;
use crate::repo::library_repo::{RepoResult, FOOD_LIBRARY_TABLE};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};

/// One pre-parsed library row supplied by an import collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedFood {
    pub food_name: String,
    pub calories: i64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

/// Counts reported back to the import collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Rows newly inserted into the library.
    pub inserted: usize,
    /// Rows skipped because the name was already defined for the user.
    pub skipped: usize,
}

/// Bulk-inserts `rows` into `user_id`'s food library.
///
/// Runs as one transaction: a storage fault rolls back the whole batch.
/// Duplicate names within the batch or against existing definitions are
/// counted as skipped.
pub fn import_foods(
    conn: &mut Connection,
    user_id: UserId,
    rows: &[ImportedFood],
) -> RepoResult<ImportOutcome> {
    ensure_connection_ready(conn, &[FOOD_LIBRARY_TABLE])?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut outcome = ImportOutcome {
        inserted: 0,
        skipped: 0,
    };

    for row in rows {
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO food_library (
                user_id,
                food_name,
                calories,
                protein_g,
                carbs_g,
                fat_g
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user_id,
                row.food_name.as_str(),
                row.calories,
                row.protein_g,
                row.carbs_g,
                row.fat_g,
            ],
        )?;
        if inserted == 0 {
            outcome.skipped += 1;
        } else {
            outcome.inserted += 1;
        }
    }

    tx.commit()?;
    info!(
        "event=food_import module=import status=ok user_id={} inserted={} skipped={}",
        user_id, outcome.inserted, outcome.skipped
    );

    Ok(outcome)
}
