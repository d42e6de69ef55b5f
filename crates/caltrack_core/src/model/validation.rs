//! Caller-input validation errors shared by write paths.
//!
//! # Responsibility
//! - Name every malformed-input condition with an actionable message.
//!
//! # Invariants
//! - Validation failures are raised before any storage access.
//! - Every variant is recoverable by the caller re-prompting.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed caller input, rejected before any storage write.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Food name is empty after trimming.
    EmptyFoodName,
    /// Per-serving calories must be zero or positive.
    NegativeCalories(i64),
    /// Serving quantity must be strictly positive.
    NonPositiveQuantity(f64),
    /// A nutrition field is NaN or infinite.
    NonFiniteNumber { field: &'static str },
    /// Entry date is not a calendar date in `YYYY-MM-DD` form.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFoodName => write!(f, "food name must not be blank"),
            Self::NegativeCalories(value) => {
                write!(f, "calories per serving must be >= 0, got {value}")
            }
            Self::NonPositiveQuantity(value) => {
                write!(f, "quantity must be > 0, got {value}")
            }
            Self::NonFiniteNumber { field } => {
                write!(f, "{field} must be a finite number")
            }
            Self::InvalidDate(value) => {
                write!(f, "entry date must be YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}
