//! Per-task urgency classification.

use crate::model::task::Task;
use chrono::{Days, NaiveDate, NaiveDateTime};

/// Days covered by the "due soon" window (the next 24 hours, rounded to
/// calendar days).
pub const DUE_SOON_WINDOW_DAYS: u32 = 1;

/// Urgency tag used to colour task rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueState {
    Completed,
    Overdue,
    DueSoon,
    Upcoming,
}

/// Incomplete and due on a day before today.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    !task.completed && task.due_date < now.date()
}

/// Incomplete and due today or within the next day.
pub fn is_due_soon(task: &Task, now: NaiveDateTime) -> bool {
    !task.completed && is_within_window(task.due_date, now, DUE_SOON_WINDOW_DAYS)
}

pub fn due_state(task: &Task, now: NaiveDateTime) -> DueState {
    if task.completed {
        DueState::Completed
    } else if is_overdue(task, now) {
        DueState::Overdue
    } else if is_due_soon(task, now) {
        DueState::DueSoon
    } else {
        DueState::Upcoming
    }
}

/// `today <= date <= today + window_days`.
pub(crate) fn is_within_window(date: NaiveDate, now: NaiveDateTime, window_days: u32) -> bool {
    let today = now.date();
    date >= today && date <= window_end(today, window_days)
}

fn window_end(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::{due_state, is_due_soon, is_overdue, is_within_window, DueState};
    use crate::model::task::{Priority, Task, TaskDraft};
    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn task_due(due: NaiveDate) -> Task {
        Task::new(
            TaskDraft::new("Essay", "History", Priority::Low, due),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn task_due_today_is_due_soon_not_overdue_all_day() {
        let task = task_due(date(2024, 3, 10));
        for hour in [0, 12, 23] {
            let now = at(2024, 3, 10, hour);
            assert!(!is_overdue(&task, now));
            assert!(is_due_soon(&task, now));
        }
        assert!(is_overdue(&task, at(2024, 3, 11, 0)));
    }

    #[test]
    fn due_soon_covers_tomorrow_only() {
        let now = at(2024, 3, 10, 18);
        assert!(is_due_soon(&task_due(date(2024, 3, 11)), now));
        assert!(!is_due_soon(&task_due(date(2024, 3, 12)), now));
    }

    #[test]
    fn completed_tasks_are_never_overdue_or_due_soon() {
        let mut task = task_due(date(2024, 2, 1));
        task.toggle_completion(Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap());
        let now = at(2024, 3, 10, 9);
        assert!(!is_overdue(&task, now));
        assert!(!is_due_soon(&task, now));
        assert_eq!(due_state(&task, now), DueState::Completed);
    }

    #[test]
    fn due_state_orders_urgency() {
        let now = at(2024, 3, 10, 9);
        assert_eq!(due_state(&task_due(date(2024, 3, 9)), now), DueState::Overdue);
        assert_eq!(due_state(&task_due(date(2024, 3, 11)), now), DueState::DueSoon);
        assert_eq!(due_state(&task_due(date(2024, 3, 20)), now), DueState::Upcoming);
    }

    #[test]
    fn window_saturates_at_calendar_end() {
        let now = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        assert!(is_within_window(NaiveDate::MAX, now, 14));
    }
}
