//! Food library domain model.
//!
//! # Responsibility
//! - Define the per-serving food definition and its validation rules.
//! - Provide quantity scaling used when a food is logged.
//!
//! # Invariants
//! - Library values always describe exactly one serving.
//! - `(user_id, food_name)` identifies a definition; first write wins.
//! - Absent macro values read as 0 grams.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Nutrition values for some amount of food, in kcal and grams.
///
/// Used both for scaled log snapshots and for summary totals, so all
/// fields are real numbers even where library storage keeps integers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Nutrients {
    /// Component-wise sum, used by daily aggregation.
    pub fn add(&self, other: &Nutrients) -> Nutrients {
        Nutrients {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
        }
    }
}

/// Persisted food definition, nutrition per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Surrogate row id assigned by storage.
    pub food_id: i64,
    pub user_id: UserId,
    pub food_name: String,
    /// Whole kcal per serving.
    pub calories: i64,
    /// Grams per serving. NULL columns read back as 0.
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl FoodItem {
    /// Nutrition for `quantity` servings of this food.
    ///
    /// # Contract
    /// - Linear in `quantity`: every field is `base * quantity`.
    /// - Callers must have validated `quantity > 0`.
    pub fn scaled(&self, quantity: f64) -> Nutrients {
        Nutrients {
            calories: self.calories as f64 * quantity,
            protein_g: self.protein_g * quantity,
            carbs_g: self.carbs_g * quantity,
            fat_g: self.fat_g * quantity,
        }
    }

    /// Nutrition for exactly one serving.
    pub fn per_serving(&self) -> Nutrients {
        self.scaled(1.0)
    }
}

/// Caller-supplied definition for a food not yet in the library.
///
/// Macro fields are optional; an absent value is stored as NULL and
/// reads back as 0 grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub user_id: UserId,
    pub food_name: String,
    pub calories: i64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

impl NewFood {
    /// Creates a definition with all macro fields present.
    pub fn new(
        user_id: UserId,
        food_name: impl Into<String>,
        calories: i64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> Self {
        Self {
            user_id,
            food_name: food_name.into(),
            calories,
            protein_g: Some(protein_g),
            carbs_g: Some(carbs_g),
            fat_g: Some(fat_g),
        }
    }

    /// Checks caller input before any storage write.
    ///
    /// # Errors
    /// - `EmptyFoodName` when the name is blank after trim.
    /// - `NegativeCalories` when kcal per serving is below zero.
    /// - `NonFiniteNumber` when a supplied macro value is NaN/infinite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.food_name.trim().is_empty() {
            return Err(ValidationError::EmptyFoodName);
        }
        if self.calories < 0 {
            return Err(ValidationError::NegativeCalories(self.calories));
        }
        for (field, value) in [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteNumber { field });
                }
            }
        }
        Ok(())
    }

    /// One-serving nutrition snapshot with absent macros read as 0.
    pub fn per_serving(&self) -> Nutrients {
        Nutrients {
            calories: self.calories as f64,
            protein_g: self.protein_g.unwrap_or(0.0),
            carbs_g: self.carbs_g.unwrap_or(0.0),
            fat_g: self.fat_g.unwrap_or(0.0),
        }
    }
}
