//! Goal progress helpers.

use crate::model::goal::StudyGoal;

/// Step used by the goal screen's +/- controls.
pub const PROGRESS_STEP: i32 = 10;

/// Aggregate numbers for the goals screen header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// Mean progress rounded to the nearest integer, `0` without goals.
    pub average_progress: u8,
}

/// Returns a copy of `goal` with progress moved by `delta` and clamped.
pub fn adjust_progress(goal: &StudyGoal, delta: i32) -> StudyGoal {
    StudyGoal {
        progress: goal.progress.saturating_add(delta),
        ..goal.clone()
    }
}

pub fn goal_summary(goals: &[StudyGoal]) -> GoalSummary {
    let completed = goals.iter().filter(|goal| goal.is_complete()).count();
    let average_progress = if goals.is_empty() {
        0
    } else {
        let sum: u64 = goals
            .iter()
            .map(|goal| u64::from(goal.progress.value()))
            .sum();
        (sum as f64 / goals.len() as f64).round() as u8
    };

    GoalSummary {
        total: goals.len(),
        active: goals.len() - completed,
        completed,
        average_progress,
    }
}
