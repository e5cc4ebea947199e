//! Injectable time source.
//!
//! # Responsibility
//! - Provide the store with creation/completion timestamps.
//! - Give callers one place to sample "now" per render pass.
//!
//! # Invariants
//! - View functions never read a clock; they receive `now` as an argument.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current wall-clock time as read in `tz`.
    fn now_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime
    where
        Self: Sized,
    {
        self.now().with_timezone(tz).naive_local()
    }

    /// Current wall-clock time in the local calendar, as used by view queries.
    fn local_now(&self) -> NaiveDateTime
    where
        Self: Sized,
    {
        self.now_in(&Local)
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
