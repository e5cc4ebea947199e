//! Study planner domain model.
//!
//! # Responsibility
//! - Define the canonical `Task` and `StudyGoal` records.
//! - Keep the JSON wire shape compatible with previously stored planner data.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - `created_at` is set once and never rewritten.
//! - Goal progress is clamped to `0..=100` by its type.

pub mod goal;
pub mod task;
pub mod validation;
