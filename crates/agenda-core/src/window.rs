//! Bounded agenda windows.

use chrono::{Days, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Validation error for empty windows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("agenda window must cover at least one day, got {days}")]
pub struct InvalidWindow {
    pub days: u32,
}

/// The bounded span of days an agenda query covers, anchored at an explicit
/// "now".
///
/// Constructed fresh per query and never persisted. There is no hidden clock:
/// `now` comes from the caller, which keeps the engine deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaWindow {
    now: NaiveDateTime,
    days: u32,
    overdue_today: bool,
}

impl AgendaWindow {
    /// Creates a window of at least one day.
    pub const fn new(
        now: NaiveDateTime,
        days: u32,
        overdue_today: bool,
    ) -> Result<Self, InvalidWindow> {
        if days == 0 {
            return Err(InvalidWindow { days });
        }
        Ok(Self {
            now,
            days,
            overdue_today,
        })
    }

    /// The current instant the window is anchored at.
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// How many days the window covers, starting today.
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Whether missed occurrences collapse into a marker on today.
    pub const fn overdue_today(&self) -> bool {
        self.overdue_today
    }

    /// Today's calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// The exclusive upper date bound: `today + days`.
    pub fn end_date(&self) -> NaiveDate {
        self.today()
            .checked_add_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MAX)
    }
}
