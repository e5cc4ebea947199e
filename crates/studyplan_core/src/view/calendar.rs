//! Month grid layout and per-day task buckets.
//!
//! # Invariants
//! - Weeks start on Sunday; `leading_blanks` is the weekday index of day 1.
//! - Day matching is by calendar date only.
//! - Month navigation saturates at the ends of the supported date range.

use crate::model::task::Task;
use crate::view::classify::is_overdue;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

/// A calendar month, always backed by a valid first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Returns `None` for months outside `1..=12` or an unsupported year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month a given date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// Month number in `1..=12`.
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }

    pub fn next(self) -> Self {
        self.shift(Months::new(1), true)
    }

    pub fn prev(self) -> Self {
        self.shift(Months::new(1), false)
    }

    pub fn day_count(self) -> u32 {
        match self.month() {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            _ => 28,
        }
    }

    /// Date of `day` in this month, if it exists.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    /// Every date in the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        (1..=self.day_count()).filter_map(move |day| self.day(day))
    }

    fn shift(self, months: Months, forward: bool) -> Self {
        let shifted = if forward {
            self.first_day.checked_add_months(months)
        } else {
            self.first_day.checked_sub_months(months)
        };
        shifted.map_or(self, |first_day| Self { first_day })
    }
}

/// Layout numbers for drawing one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// Empty cells before day 1 (Sunday = 0).
    pub leading_blanks: u32,
    pub day_count: u32,
}

/// One rendered day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    /// All tasks due that day, in input order.
    pub tasks: Vec<&'a Task>,
    pub overdue: Vec<&'a Task>,
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

pub fn month_grid(month: YearMonth) -> MonthGrid {
    MonthGrid {
        month,
        leading_blanks: month.first_day().weekday().num_days_from_sunday(),
        day_count: month.day_count(),
    }
}

/// Tasks due exactly on `date`, in input order.
pub fn tasks_on_date<'a, I>(tasks: I, date: NaiveDate) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.due_date == date)
        .collect()
}

/// Builds one cell per day of `month`.
pub fn calendar_month(tasks: &[Task], month: YearMonth, now: NaiveDateTime) -> Vec<CalendarDay<'_>> {
    let today = now.date();
    month
        .days()
        .map(|date| {
            let due = tasks_on_date(tasks, date);
            CalendarDay {
                date,
                is_today: date == today,
                overdue: due.iter().copied().filter(|task| is_overdue(task, now)).collect(),
                pending: due.iter().copied().filter(|task| !task.completed).collect(),
                completed: due.iter().copied().filter(|task| task.completed).collect(),
                tasks: due,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::YearMonth;
    use chrono::NaiveDate;

    #[test]
    fn new_rejects_invalid_months() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn day_count_handles_century_leap_rules() {
        assert_eq!(YearMonth::new(2000, 2).unwrap().day_count(), 29);
        assert_eq!(YearMonth::new(1900, 2).unwrap().day_count(), 28);
        assert_eq!(YearMonth::new(2024, 4).unwrap().day_count(), 30);
    }

    #[test]
    fn navigation_saturates_at_range_end() {
        let last = YearMonth::containing(NaiveDate::MAX);
        assert_eq!(last.next(), last);
        let first = YearMonth::containing(NaiveDate::MIN);
        assert_eq!(first.prev(), first);
    }
}
