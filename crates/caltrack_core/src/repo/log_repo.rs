//! Daily log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide append-only consumption event storage per user and day.
//! - Own the two composite logging workflows built on the food library.
//!
//! # Invariants
//! - `append` stores nutrition values verbatim; scaling responsibility
//!   stays with the workflow that produced them.
//! - `log_from_library` scales a library snapshot by `quantity`.
//! - `log_new_food` registers the food and logs one serving in a single
//!   transaction; both writes commit or neither does.
//! - Log rows are never updated or deleted.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::food::{NewFood, Nutrients};
use crate::model::log::{EntryDate, LogEntry, NewLogEntry};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::library_repo::{
    FoodLibraryRepository, RepoError, RepoResult, SqliteFoodLibraryRepository, FOOD_LIBRARY_TABLE,
};
use crate::repo::{ensure_connection_ready, RequiredTable};
use log::debug;
use rusqlite::{params, Connection, Row, TransactionBehavior};

pub(crate) const FOOD_LOG_TABLE: RequiredTable = RequiredTable {
    table: "food_log",
    columns: &[
        "log_id",
        "user_id",
        "entry_date",
        "quantity",
        "food_name",
        "calories",
        "protein_g",
        "carbs_g",
        "fat_g",
    ],
};

const LOG_SELECT_SQL: &str = "SELECT
    log_id,
    user_id,
    entry_date,
    quantity,
    food_name,
    calories,
    protein_g,
    carbs_g,
    fat_g
FROM food_log";

/// Repository interface for daily consumption events.
pub trait DailyLogRepository {
    /// Inserts one log row with the nutrition fields taken verbatim.
    fn append(&self, entry: &NewLogEntry) -> RepoResult<LogEntry>;
    /// All entries for the exact user and date, in insertion order.
    fn list_for_day(&self, user_id: UserId, date: &EntryDate) -> RepoResult<Vec<LogEntry>>;
    /// Logs `quantity` servings of a food already in the library.
    ///
    /// Resolves the definition by name, scales every nutrition field by
    /// `quantity` and appends the snapshot together with the multiplier.
    fn log_from_library(
        &self,
        user_id: UserId,
        food_name: &str,
        quantity: f64,
        date: &EntryDate,
    ) -> RepoResult<LogEntry>;
    /// Registers a new food and logs exactly one serving of it.
    ///
    /// Library insert and log append run in one transaction. When the
    /// name already exists the library keeps its stored values, but the
    /// log row still snapshots the caller-provided ones.
    fn log_new_food(&mut self, food: &NewFood, date: &EntryDate) -> RepoResult<LogEntry>;
}

/// SQLite-backed daily log repository.
pub struct SqliteDailyLogRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDailyLogRepository<'conn> {
    /// Constructs a repository from a provisioned/ready connection.
    ///
    /// Requires the library table as well, since the composite logging
    /// workflows read and write it.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[FOOD_LOG_TABLE, FOOD_LIBRARY_TABLE])?;
        Ok(Self { conn })
    }
}

impl DailyLogRepository for SqliteDailyLogRepository<'_> {
    fn append(&self, entry: &NewLogEntry) -> RepoResult<LogEntry> {
        entry.validate()?;
        let log_id = insert_log_row(self.conn, entry)?;
        Ok(materialize(entry, log_id))
    }

    fn list_for_day(&self, user_id: UserId, date: &EntryDate) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOG_SELECT_SQL}
             WHERE user_id = ?1
               AND entry_date = ?2
             ORDER BY log_id ASC;"
        ))?;

        let mut rows = stmt.query(params![user_id, date.as_str()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_log_row(row)?);
        }

        Ok(entries)
    }

    fn log_from_library(
        &self,
        user_id: UserId,
        food_name: &str,
        quantity: f64,
        date: &EntryDate,
    ) -> RepoResult<LogEntry> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity(quantity).into());
        }

        let library = SqliteFoodLibraryRepository::try_new(self.conn)?;
        let item = library
            .get(user_id, food_name)?
            .ok_or_else(|| RepoError::FoodNotFound {
                user_id,
                food_name: food_name.to_string(),
            })?;

        let entry = NewLogEntry {
            user_id,
            entry_date: date.clone(),
            quantity,
            food_name: item.food_name.clone(),
            nutrients: item.scaled(quantity),
        };
        self.append(&entry)
    }

    fn log_new_food(&mut self, food: &NewFood, date: &EntryDate) -> RepoResult<LogEntry> {
        food.validate()?;

        let entry = NewLogEntry {
            user_id: food.user_id,
            entry_date: date.clone(),
            quantity: 1.0,
            food_name: food.food_name.clone(),
            nutrients: food.per_serving(),
        };

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

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
                food.user_id,
                food.food_name.as_str(),
                food.calories,
                food.protein_g,
                food.carbs_g,
                food.fat_g,
            ],
        )?;
        if inserted == 0 {
            debug!(
                "event=food_define module=repo status=ignored user_id={} food_name={}",
                food.user_id, food.food_name
            );
        }

        let log_id = insert_log_row(&tx, &entry)?;
        tx.commit()?;

        Ok(materialize(&entry, log_id))
    }
}

fn insert_log_row(conn: &Connection, entry: &NewLogEntry) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO food_log (
            user_id,
            entry_date,
            quantity,
            food_name,
            calories,
            protein_g,
            carbs_g,
            fat_g
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            entry.user_id,
            entry.entry_date.as_str(),
            entry.quantity,
            entry.food_name.as_str(),
            entry.nutrients.calories,
            entry.nutrients.protein_g,
            entry.nutrients.carbs_g,
            entry.nutrients.fat_g,
        ],
    )?;
    let log_id = conn.last_insert_rowid();

    debug!(
        "event=log_append module=repo status=ok user_id={} entry_date={} quantity={} log_id={}",
        entry.user_id, entry.entry_date, entry.quantity, log_id
    );

    Ok(log_id)
}

fn materialize(entry: &NewLogEntry, log_id: i64) -> LogEntry {
    LogEntry {
        log_id,
        user_id: entry.user_id,
        entry_date: entry.entry_date.clone(),
        quantity: entry.quantity,
        food_name: entry.food_name.clone(),
        nutrients: entry.nutrients,
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<LogEntry> {
    let date_text: String = row.get("entry_date")?;
    let entry_date = EntryDate::parse(&date_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in food_log.entry_date"
        ))
    })?;

    let quantity: f64 = row.get("quantity")?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive quantity `{quantity}` in food_log.quantity"
        )));
    }

    Ok(LogEntry {
        log_id: row.get("log_id")?,
        user_id: row.get("user_id")?,
        entry_date,
        quantity,
        food_name: row.get("food_name")?,
        nutrients: Nutrients {
            calories: row.get("calories")?,
            protein_g: row.get::<_, Option<f64>>("protein_g")?.unwrap_or(0.0),
            carbs_g: row.get::<_, Option<f64>>("carbs_g")?.unwrap_or(0.0),
            fat_g: row.get::<_, Option<f64>>("fat_g")?.unwrap_or(0.0),
        },
    })
}
