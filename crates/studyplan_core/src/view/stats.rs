//! Aggregates shown on the dashboard.
//!
//! # Invariants
//! - Percentages are `0.0` for empty denominators.
//! - Subject stats iterate alphabetically (`BTreeMap`) for stable display.

use crate::model::goal::StudyGoal;
use crate::model::task::Task;
use crate::view::classify::{is_due_soon, is_overdue};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Completion counts for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubjectStats {
    pub total: usize,
    pub completed: usize,
}

impl SubjectStats {
    pub fn completion_percent(&self) -> f64 {
        percent(self.completed, self.total)
    }
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// `completed_tasks / total_tasks * 100`, `0.0` without tasks.
    pub completion_rate: f64,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub total_goals: usize,
    /// Goals with progress below 100.
    pub active_goals: usize,
    pub completed_goals: usize,
}

/// Groups tasks by exact subject text.
pub fn subject_stats<'a, I>(tasks: I) -> BTreeMap<String, SubjectStats>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut stats: BTreeMap<String, SubjectStats> = BTreeMap::new();
    for task in tasks {
        let entry = stats.entry(task.subject.clone()).or_default();
        entry.total += 1;
        if task.completed {
            entry.completed += 1;
        }
    }
    stats
}

pub fn dashboard_summary(tasks: &[Task], goals: &[StudyGoal], now: NaiveDateTime) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_tasks: tasks.len(),
        total_goals: goals.len(),
        ..DashboardSummary::default()
    };

    for task in tasks {
        if task.completed {
            summary.completed_tasks += 1;
        }
        if is_overdue(task, now) {
            summary.overdue_count += 1;
        }
        if is_due_soon(task, now) {
            summary.due_soon_count += 1;
        }
    }
    summary.completion_rate = percent(summary.completed_tasks, summary.total_tasks);

    summary.completed_goals = goals.iter().filter(|goal| goal.is_complete()).count();
    summary.active_goals = summary.total_goals - summary.completed_goals;
    summary
}

pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_guards_zero_denominator() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
