//! User identity and daily goals.
//!
//! # Responsibility
//! - Define the user row shape and the default-user seed value.
//!
//! # Invariants
//! - Goal fields are read-only for core; no mutation path exists.
//! - The seed user is inserted once at provisioning time, never deleted.

use serde::{Deserialize, Serialize};

/// Stable identifier for a tracked user.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Persisted user row with daily nutrition goals.
///
/// Only `daily_calorie_goal` is required; macro goals are optional and
/// not consulted by the summary aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    /// Target calorie intake the daily progress is measured against.
    pub daily_calorie_goal: i64,
    pub daily_protein_goal: Option<i64>,
    pub daily_carbs_goal: Option<i64>,
    pub daily_fat_goal: Option<i64>,
}

/// Seed row inserted when provisioning finds no user.
///
/// Threaded explicitly through `db::open_db_with` so callers can run a
/// different identity without touching core defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultUser {
    pub user_id: UserId,
    pub username: String,
    pub daily_calorie_goal: i64,
}

impl Default for DefaultUser {
    fn default() -> Self {
        Self {
            user_id: 1,
            username: "default_user".to_string(),
            daily_calorie_goal: 2000,
        }
    }
}
