//! SQL aggregation over the daily food log.
//!
//! # Responsibility
//! - Sum a day's logged nutrition and relate calories to the user goal.
//! - Return a complete summary value, never a partially populated one.
//!
//! # Invariants
//! - An empty day yields all-zero totals and progress 0, never an error.
//! - Totals equal the field-wise sum of `list_for_day` for the same day.
//! - `progress_fraction` is unclamped; values above 1.0 are legitimate.

use crate::db::DbError;
use crate::model::log::EntryDate;
use crate::model::user::{DefaultUser, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for summary APIs.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Summary-layer error for goal lookup and aggregation.
#[derive(Debug)]
pub enum SummaryError {
    /// Stored calorie goal cannot anchor a progress fraction.
    InvalidGoal { user_id: UserId, goal: i64 },
    Db(DbError),
}

impl Display for SummaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGoal { user_id, goal } => write!(
                f,
                "daily calorie goal for user {user_id} must be positive, found {goal}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SummaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGoal { .. } => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for SummaryError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SummaryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Aggregated nutrition for one user and day, against the calorie goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
    pub calorie_goal: i64,
    /// `total_calories / calorie_goal`, unclamped.
    pub progress_fraction: f64,
}

/// Computes the daily totals and progress for one user and date.
///
/// The goal falls back to the default 2000 kcal when the user row is
/// absent; provisioning normally guarantees the row exists.
///
/// # Errors
/// - `InvalidGoal` when a persisted goal is zero or negative.
/// - `Db` on storage faults.
pub fn summarize_day(
    conn: &Connection,
    user_id: UserId,
    date: &EntryDate,
) -> SummaryResult<DailySummary> {
    let calorie_goal = fetch_calorie_goal(conn, user_id)?;
    if calorie_goal <= 0 {
        return Err(SummaryError::InvalidGoal {
            user_id,
            goal: calorie_goal,
        });
    }

    let (total_calories, total_protein_g, total_carbs_g, total_fat_g) = conn.query_row(
        "SELECT
            SUM(calories),
            SUM(protein_g),
            SUM(carbs_g),
            SUM(fat_g)
         FROM food_log
         WHERE user_id = ?1
           AND entry_date = ?2;",
        params![user_id, date.as_str()],
        |row| {
            Ok((
                row.get::<_, Option<f64>>(0)?.unwrap_or(0.0),
                row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
            ))
        },
    )?;

    Ok(DailySummary {
        total_calories,
        total_protein_g,
        total_carbs_g,
        total_fat_g,
        calorie_goal,
        progress_fraction: total_calories / calorie_goal as f64,
    })
}

fn fetch_calorie_goal(conn: &Connection, user_id: UserId) -> SummaryResult<i64> {
    let stored: Option<i64> = conn
        .query_row(
            "SELECT daily_calorie_goal FROM users WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(stored.unwrap_or_else(|| DefaultUser::default().daily_calorie_goal))
}
