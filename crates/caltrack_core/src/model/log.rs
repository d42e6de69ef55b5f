//! Daily consumption log domain model.
//!
//! # Responsibility
//! - Define the append-only log entry shape and its entry-date type.
//! - Validate log input before persistence.
//!
//! # Invariants
//! - `quantity` is strictly positive.
//! - Nutrition fields are already scaled when an entry is built; storage
//!   takes them verbatim.
//! - `food_name` is a denormalized copy, resolved once and never again.

use crate::model::food::Nutrients;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// Calendar date in ISO `YYYY-MM-DD` form, no time component.
///
/// Construction goes through [`EntryDate::parse`], so a held value is
/// always well-formed. Core never reads the wall clock; callers decide
/// which day an entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDate(String);

impl EntryDate {
    /// Parses and validates an ISO calendar date.
    ///
    /// # Errors
    /// - `InvalidDate` when the text is not `YYYY-MM-DD` or the month or
    ///   day is out of range.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let captures = ISO_DATE_RE
            .captures(value)
            .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))?;

        // Regex guarantees pure digit groups, so the parses cannot fail.
        let month: u32 = captures[2].parse().unwrap_or(0);
        let day: u32 = captures[3].parse().unwrap_or(0);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(ValidationError::InvalidDate(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntryDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Persisted consumption event: a quantity-scaled snapshot of one food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Append-only row id assigned by storage.
    pub log_id: i64,
    pub user_id: UserId,
    pub entry_date: EntryDate,
    /// Servings multiplier recorded alongside its resulting totals.
    pub quantity: f64,
    pub food_name: String,
    /// Already scaled by `quantity`.
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// Input for one log append; nutrition fields are taken verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub user_id: UserId,
    pub entry_date: EntryDate,
    pub quantity: f64,
    pub food_name: String,
    pub nutrients: Nutrients,
}

impl NewLogEntry {
    /// Checks caller input before any storage write.
    ///
    /// # Errors
    /// - `NonPositiveQuantity` when `quantity <= 0` or is not finite.
    /// - `EmptyFoodName` when the snapshot name is blank.
    /// - `NonFiniteNumber` when a nutrition field is NaN/infinite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity(self.quantity));
        }
        if self.food_name.trim().is_empty() {
            return Err(ValidationError::EmptyFoodName);
        }
        for (field, value) in [
            ("calories", self.nutrients.calories),
            ("protein_g", self.nutrients.protein_g),
            ("carbs_g", self.nutrients.carbs_g),
            ("fat_g", self.nutrients.fat_g),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteNumber { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryDate, NewLogEntry};
    use crate::model::food::Nutrients;
    use crate::model::validation::ValidationError;

    fn entry(quantity: f64) -> NewLogEntry {
        NewLogEntry {
            user_id: 1,
            entry_date: EntryDate::parse("2024-01-01").unwrap(),
            quantity,
            food_name: "Rice".to_string(),
            nutrients: Nutrients {
                calories: 200.0,
                protein_g: 4.0,
                carbs_g: 45.0,
                fat_g: 0.5,
            },
        }
    }

    #[test]
    fn parse_accepts_iso_dates() {
        let date = EntryDate::parse("2024-01-01").unwrap();
        assert_eq!(date.as_str(), "2024-01-01");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in ["2024/01/01", "24-01-01", "2024-13-01", "2024-01-32", "today", ""] {
            let err = EntryDate::parse(bad).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidDate(_)), "{bad}");
        }
    }

    #[test]
    fn validate_rejects_zero_and_negative_quantity() {
        for quantity in [0.0, -1.0, f64::NAN] {
            let err = entry(quantity).validate().unwrap_err();
            assert!(matches!(err, ValidationError::NonPositiveQuantity(_)));
        }
    }

    #[test]
    fn validate_accepts_fractional_quantity() {
        assert!(entry(0.5).validate().is_ok());
    }
}
