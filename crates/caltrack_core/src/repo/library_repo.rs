//! Food library repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide per-user food definition storage keyed by name.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `define` is insert-if-absent: a second definition under the same
//!   `(user_id, food_name)` is a silent no-op and the stored values stay
//!   authoritative (first write wins).
//! - Prefix search compares persisted bytes, case-sensitively, and
//!   treats SQL wildcard characters literally.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::food::{FoodItem, NewFood};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::{ensure_connection_ready, RequiredTable};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const FOOD_LIBRARY_TABLE: RequiredTable = RequiredTable {
    table: "food_library",
    columns: &[
        "food_id",
        "user_id",
        "food_name",
        "calories",
        "protein_g",
        "carbs_g",
        "fat_g",
    ],
};

const FOOD_SELECT_SQL: &str = "SELECT
    food_id,
    user_id,
    food_name,
    calories,
    protein_g,
    carbs_g,
    fat_g
FROM food_library";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for store and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Lookup by name found nothing while a definition was required.
    FoodNotFound {
        user_id: UserId,
        food_name: String,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::FoodNotFound { user_id, food_name } => {
                write!(f, "food `{food_name}` not found for user {user_id}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not provisioned: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the per-user food library.
pub trait FoodLibraryRepository {
    /// Registers a food definition, insert-if-absent.
    ///
    /// Re-defining an existing `(user_id, food_name)` pair leaves the
    /// stored values unchanged and returns `Ok(())`.
    fn define(&self, food: &NewFood) -> RepoResult<()>;
    /// Exact-name lookup; absent is a normal outcome, not an error.
    fn get(&self, user_id: UserId, food_name: &str) -> RepoResult<Option<FoodItem>>;
    /// Case-sensitive name prefix search in storage order.
    ///
    /// An empty prefix returns an empty list without touching storage.
    fn find_by_prefix(&self, user_id: UserId, prefix: &str) -> RepoResult<Vec<String>>;
}

/// SQLite-backed food library repository.
pub struct SqliteFoodLibraryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFoodLibraryRepository<'conn> {
    /// Constructs a repository from a provisioned/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[FOOD_LIBRARY_TABLE])?;
        Ok(Self { conn })
    }
}

impl FoodLibraryRepository for SqliteFoodLibraryRepository<'_> {
    fn define(&self, food: &NewFood) -> RepoResult<()> {
        food.validate()?;

        let inserted = self.conn.execute(
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
        } else {
            debug!(
                "event=food_define module=repo status=ok user_id={} food_name={}",
                food.user_id, food.food_name
            );
        }

        Ok(())
    }

    fn get(&self, user_id: UserId, food_name: &str) -> RepoResult<Option<FoodItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FOOD_SELECT_SQL}
             WHERE user_id = ?1
               AND food_name = ?2;"
        ))?;

        let mut rows = stmt.query(params![user_id, food_name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_food_row(row)?));
        }

        Ok(None)
    }

    fn find_by_prefix(&self, user_id: UserId, prefix: &str) -> RepoResult<Vec<String>> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        // substr keeps the match case-sensitive and treats `%`/`_`
        // literally, unlike LIKE.
        let mut stmt = self.conn.prepare(
            "SELECT food_name
             FROM food_library
             WHERE user_id = ?1
               AND substr(food_name, 1, length(?2)) = ?2;",
        )?;

        let mut rows = stmt.query(params![user_id, prefix])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get::<_, String>(0)?);
        }

        Ok(names)
    }
}

fn parse_food_row(row: &Row<'_>) -> RepoResult<FoodItem> {
    let calories: i64 = row.get("calories")?;
    if calories < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative calories value `{calories}` in food_library.calories"
        )));
    }

    Ok(FoodItem {
        food_id: row.get("food_id")?,
        user_id: row.get("user_id")?,
        food_name: row.get("food_name")?,
        calories,
        protein_g: row.get::<_, Option<f64>>("protein_g")?.unwrap_or(0.0),
        carbs_g: row.get::<_, Option<f64>>("carbs_g")?.unwrap_or(0.0),
        fat_g: row.get::<_, Option<f64>>("fat_g")?.unwrap_or(0.0),
    })
}
