//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose read access to user rows and their daily goals.
//!
//! # Invariants
//! - Core offers no mutation path for user rows; the only write is the
//!   provisioning-time seed in `db::open`.

use crate::model::user::{UserId, UserProfile};
use crate::repo::library_repo::{RepoError, RepoResult};
use crate::repo::{ensure_connection_ready, RequiredTable};
use rusqlite::{Connection, Row};

pub(crate) const USERS_TABLE: RequiredTable = RequiredTable {
    table: "users",
    columns: &["user_id", "username", "daily_calorie_goal"],
};

/// Repository interface for user lookups.
pub trait UserRepository {
    /// Gets one user by id; absent is a normal outcome.
    fn get(&self, user_id: UserId) -> RepoResult<Option<UserProfile>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a provisioned/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[USERS_TABLE])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn get(&self, user_id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                user_id,
                username,
                daily_calorie_goal,
                daily_protein_goal,
                daily_carbs_goal,
                daily_fat_goal
             FROM users
             WHERE user_id = ?1;",
        )?;

        let mut rows = stmt.query([user_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let daily_calorie_goal: i64 = row.get("daily_calorie_goal")?;
    if daily_calorie_goal <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive goal `{daily_calorie_goal}` in users.daily_calorie_goal"
        )));
    }

    Ok(UserProfile {
        user_id: row.get("user_id")?,
        username: row.get("username")?,
        daily_calorie_goal,
        daily_protein_goal: row.get("daily_protein_goal")?,
        daily_carbs_goal: row.get("daily_carbs_goal")?,
        daily_fat_goal: row.get("daily_fat_goal")?,
    })
}
