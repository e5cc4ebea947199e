//! Task list queries: search, filter, sort, count and upcoming windows.
//!
//! # Invariants
//! - Filtering preserves input order.
//! - Sorting is stable, so re-sorting with the same key is a no-op.

use crate::model::task::Task;
use crate::view::classify::{is_overdue, is_within_window};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Completion-state filter selectable in the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    Overdue,
}

impl TaskFilter {
    pub const VARIANTS: [Self; 4] = [Self::All, Self::Pending, Self::Completed, Self::Overdue];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::VARIANTS
            .into_iter()
            .find(|filter| filter.as_str() == value)
    }

    pub fn matches(self, task: &Task, now: NaiveDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::Overdue => is_overdue(task, now),
        }
    }
}

/// Ordering selectable in the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Subject,
}

impl SortKey {
    pub const VARIANTS: [Self; 3] = [Self::DueDate, Self::Priority, Self::Subject];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Subject => "subject",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|key| key.as_str() == value)
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => a.due_date.cmp(&b.due_date),
            // Highest rank first.
            Self::Priority => b.priority.cmp(&a.priority),
            Self::Subject => compare_subjects(&a.subject, &b.subject),
        }
    }
}

/// Per-filter task counts for the filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn get(&self, filter: TaskFilter) -> usize {
        match filter {
            TaskFilter::All => self.all,
            TaskFilter::Pending => self.pending,
            TaskFilter::Completed => self.completed,
            TaskFilter::Overdue => self.overdue,
        }
    }
}

/// Returns tasks whose title or subject contains `search` (case-insensitive)
/// and that pass `filter`, in input order.
///
/// `search` is matched as typed, whitespace included; an empty search
/// matches all.
pub fn filter_tasks<'a, I>(
    tasks: I,
    search: &str,
    filter: TaskFilter,
    now: NaiveDateTime,
) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = search.to_lowercase();
    tasks
        .into_iter()
        .filter(|task| matches_search(task, &needle) && filter.matches(task, now))
        .collect()
}

/// Returns a new stably-sorted sequence.
pub fn sort_tasks<'a, I>(tasks: I, key: SortKey) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&'a Task> = tasks.into_iter().collect();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Counts every filter in one pass.
pub fn count_by_filter<'a, I>(tasks: I, now: NaiveDateTime) -> TaskCounts
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .fold(TaskCounts::default(), |mut counts, task| {
            counts.all += 1;
            if task.completed {
                counts.completed += 1;
            } else {
                counts.pending += 1;
            }
            if is_overdue(task, now) {
                counts.overdue += 1;
            }
            counts
        })
}

/// Incomplete tasks due between today and `today + window_days`, soonest first.
///
/// Truncation for previews is left to the caller.
pub fn upcoming_in_window<'a, I>(tasks: I, now: NaiveDateTime, window_days: u32) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let upcoming = tasks
        .into_iter()
        .filter(|task| !task.completed && is_within_window(task.due_date, now, window_days));
    sort_tasks(upcoming, SortKey::DueDate)
}

fn matches_search(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title.to_lowercase().contains(needle)
        || task.subject.to_lowercase().contains(needle)
}

// Case-insensitive first so "biology" and "Biology" group together; exact
// comparison breaks ties to keep the order total.
fn compare_subjects(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
