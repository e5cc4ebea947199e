//! Derived views over task and goal snapshots.
//!
//! # Responsibility
//! - Classify, filter, sort, count and aggregate planner records for display.
//! - Bucket tasks into calendar days.
//!
//! # Invariants
//! - Every function is pure: inputs are borrowed read-only and results are
//!   freshly built.
//! - No function reads a clock. Callers sample `now` once per render pass
//!   and pass the same value to every query of that pass.
//! - Due dates are compared per calendar day: a task due today is neither
//!   overdue nor missed until the local date moves past it.
//! - Every function is total; empty input yields zero/empty output.

pub mod calendar;
pub mod classify;
pub mod goals;
pub mod stats;
pub mod tasks;
