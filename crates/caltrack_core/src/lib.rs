//! Core domain logic for CalTrack.
//! This crate is the single source of truth for tracking invariants.

pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod summary;

pub use import::{import_foods, ImportOutcome, ImportedFood};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::food::{FoodItem, NewFood, Nutrients};
pub use model::log::{EntryDate, LogEntry, NewLogEntry};
pub use model::user::{DefaultUser, UserId, UserProfile};
pub use model::validation::ValidationError;
pub use repo::library_repo::{
    FoodLibraryRepository, RepoError, RepoResult, SqliteFoodLibraryRepository,
};
pub use repo::log_repo::{DailyLogRepository, SqliteDailyLogRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use service::tracker_service::{TrackerService, TrackerServiceError};
pub use summary::daily::{summarize_day, DailySummary, SummaryError, SummaryResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
