//! Core use-case services.
//!
//! # Responsibility
//! - Own mutable planner state and route mutations to blob persistence.
//! - Keep presentation code decoupled from storage details.

pub mod planner_store;
