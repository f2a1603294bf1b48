//! Weekly schedule heuristic.
//!
//! The backend is only expected to run inside one fixed weekly window. When the
//! live probe cannot answer, this window decides between "warming up" and
//! "not scheduled".

use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};

/// The one window per week in which the backend is expected to run.
pub const SCHEDULE_WINDOW: ScheduleWindow = ScheduleWindow {
    weekday: Weekday::Sun,
    start_hour: 9,
    end_hour: 13,
};

/// A fixed weekly recurrence, evaluated on local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    /// Day of week the window falls on.
    pub weekday: Weekday,
    /// First hour inside the window (inclusive).
    pub start_hour: u32,
    /// First hour after the window (exclusive).
    pub end_hour: u32,
}

impl ScheduleWindow {
    /// Returns true if `at` falls inside the window.
    pub fn contains<T: Datelike + Timelike>(&self, at: &T) -> bool {
        at.weekday() == self.weekday && at.hour() >= self.start_hour && at.hour() < self.end_hour
    }

    /// Human-readable description, e.g. `Sundays, 9 AM - 1 PM`.
    pub fn describe(&self) -> String {
        format!(
            "{}s, {} - {}",
            weekday_name(self.weekday),
            format_hour(self.start_hour),
            format_hour(self.end_hour)
        )
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn format_hour(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

/// Source of "now" for the schedule heuristic.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
