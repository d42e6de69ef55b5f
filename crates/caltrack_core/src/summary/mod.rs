//! Daily summary aggregation.
//!
//! # Responsibility
//! - Compute running daily totals and progress-against-goal.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod daily;
