//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Apply schema migrations and seed the default user before returning
//!   a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections have migrations fully applied and exactly one
//!   user row matching the requested seed identity.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::model::user::DefaultUser;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and provisions it for the default user.
///
/// # Side effects
/// - Applies pending migrations and seeds `user_id = 1` if absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with(path, &DefaultUser::default())
}

/// Opens a SQLite database file and provisions it for `seed`.
pub fn open_db_with(path: impl AsRef<Path>, seed: &DefaultUser) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, seed, "file", started_at)
}

/// Opens an in-memory SQLite database provisioned for the default user.
///
/// Used by tests and short-lived tooling; behavior matches [`open_db`].
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db_in_memory_with(&DefaultUser::default())
}

/// Opens an in-memory SQLite database provisioned for `seed`.
pub fn open_db_in_memory_with(seed: &DefaultUser) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, seed, "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    seed: &DefaultUser,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    match provision_connection(&mut conn, seed) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_provision_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn provision_connection(conn: &mut Connection, seed: &DefaultUser) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    ensure_seed_user(conn, seed)?;
    Ok(())
}

/// Inserts the seed user when no row with its id exists yet.
///
/// Existing rows are left untouched, including their goals, so repeated
/// opens of the same database never reset user data.
fn ensure_seed_user(conn: &Connection, seed: &DefaultUser) -> DbResult<()> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT user_id FROM users WHERE user_id = ?1;",
            [seed.user_id],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        return Ok(());
    }

    conn.execute(
        "INSERT INTO users (user_id, username, daily_calorie_goal)
         VALUES (?1, ?2, ?3);",
        params![seed.user_id, seed.username.as_str(), seed.daily_calorie_goal],
    )?;
    info!(
        "event=user_seed module=db status=ok user_id={} daily_calorie_goal={}",
        seed.user_id, seed.daily_calorie_goal
    );

    Ok(())
}
