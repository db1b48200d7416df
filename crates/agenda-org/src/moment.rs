//! Calendar moments: a date with an optional time-of-day.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A point in local calendar time.
///
/// Every moment has a date; the time-of-day is optional. A date-only moment
/// stands for the whole day and compares as that day's midnight. Moments are
/// immutable values; all arithmetic produces new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Moment {
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<NaiveTime>,
}

impl Moment {
    /// Creates a whole-day moment.
    pub const fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Creates a moment with full time-of-day precision.
    pub const fn with_time(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Creates a timed moment from an instant.
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self {
            date: instant.date(),
            time: Some(instant.time()),
        }
    }

    /// The calendar date.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The time-of-day, if the moment carries one.
    pub const fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Whether the moment has time-of-day precision.
    pub const fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// The moment as an instant; date-only moments map to midnight.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

impl PartialOrd for Moment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Moment {
    fn cmp(&self, other: &Self) -> Ordering {
        // Instant order; a whole-day moment sorts before a timed midnight one.
        self.instant()
            .cmp(&other.instant())
            .then_with(|| self.time.is_some().cmp(&other.time.is_some()))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))?;
        if let Some(time) = self.time {
            write!(f, " {}", time.format("%H:%M"))?;
        }
        Ok(())
    }
}
