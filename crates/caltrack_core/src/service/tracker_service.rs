//! Consumption tracking use-case service.
//!
//! # Responsibility
//! - Provide the two named logging workflows to presentation callers.
//! - Map repository errors onto the user-facing error taxonomy.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Validation and not-found outcomes stay distinguishable from
//!   storage faults, so callers can re-prompt instead of aborting.

use crate::model::food::NewFood;
use crate::model::log::{EntryDate, LogEntry, NewLogEntry};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::library_repo::RepoError;
use crate::repo::log_repo::DailyLogRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for tracking use-cases.
#[derive(Debug)]
pub enum TrackerServiceError {
    /// Requested food has no library definition; the caller should
    /// offer the new-food workflow instead.
    FoodNotFound { user_id: UserId, food_name: String },
    /// Malformed input; the caller can re-prompt and retry.
    Invalid(ValidationError),
    /// Storage-layer failure, fatal for this operation only.
    Repo(RepoError),
}

impl Display for TrackerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FoodNotFound { user_id, food_name } => {
                write!(f, "food `{food_name}` not found for user {user_id}")
            }
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "could not complete operation: {err}"),
        }
    }
}

impl Error for TrackerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FoodNotFound { .. } => None,
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for TrackerServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::FoodNotFound { user_id, food_name } => {
                Self::FoodNotFound { user_id, food_name }
            }
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

/// Use-case facade over a daily log repository implementation.
pub struct TrackerService<R: DailyLogRepository> {
    repo: R,
}

impl<R: DailyLogRepository> TrackerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Logs `quantity` servings of a food already in the library.
    ///
    /// # Contract
    /// - Every nutrition field of the stored entry is the library value
    ///   times `quantity`.
    /// - The multiplier itself is recorded alongside the totals.
    pub fn log_from_library(
        &self,
        user_id: UserId,
        food_name: &str,
        quantity: f64,
        date: &EntryDate,
    ) -> Result<LogEntry, TrackerServiceError> {
        let entry = self
            .repo
            .log_from_library(user_id, food_name, quantity, date)?;
        Ok(entry)
    }

    /// Registers a new food and logs one serving of it atomically.
    pub fn log_new_food(
        &mut self,
        food: &NewFood,
        date: &EntryDate,
    ) -> Result<LogEntry, TrackerServiceError> {
        let entry = self.repo.log_new_food(food, date)?;
        Ok(entry)
    }

    /// Appends one pre-scaled log entry verbatim.
    pub fn append(&self, entry: &NewLogEntry) -> Result<LogEntry, TrackerServiceError> {
        let stored = self.repo.append(entry)?;
        Ok(stored)
    }

    /// Lists one day's entries in insertion order.
    pub fn list_for_day(
        &self,
        user_id: UserId,
        date: &EntryDate,
    ) -> Result<Vec<LogEntry>, TrackerServiceError> {
        let entries = self.repo.list_for_day(user_id, date)?;
        Ok(entries)
    }
}
