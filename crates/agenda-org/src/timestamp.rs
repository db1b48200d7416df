//! Timestamp values: single moments, date ranges, and the single-or-range
//! variant the engine dispatches on.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::moment::Moment;
use crate::repeater::Repeater;

/// Validation error for backwards ranges.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("range starts on {start} but ends on {end}")]
pub struct InvalidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single parsed timestamp token.
///
/// Produced once by the token parser and never mutated; advancing a repeating
/// timestamp yields a new value. Serialized as its canonical token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    /// When the timestamp points at.
    pub moment: Moment,
    /// The repetition rule, if the timestamp repeats.
    pub repeater: Option<Repeater>,
    /// Active (`<...>`) timestamps appear in the agenda; inactive (`[...]`)
    /// ones are plain records.
    pub active: bool,
}

impl Timestamp {
    /// Creates an active, non-repeating timestamp.
    pub const fn new(moment: Moment) -> Self {
        Self {
            moment,
            repeater: None,
            active: true,
        }
    }

    /// Returns the same timestamp with a repeater attached.
    #[must_use]
    pub const fn with_repeater(mut self, repeater: Repeater) -> Self {
        self.repeater = Some(repeater);
        self
    }

    /// Returns the same timestamp marked inactive.
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = if self.active { ('<', '>') } else { ('[', ']') };
        // Weekday labels are recomputed from the date, never carried over.
        write!(
            f,
            "{open}{} {}",
            self.moment.date().format("%Y-%m-%d"),
            self.moment.date().format("%a")
        )?;
        if let Some(time) = self.moment.time() {
            write!(f, " {}", time.format("%H:%M"))?;
        }
        if let Some(repeater) = &self.repeater {
            write!(f, " {repeater}")?;
        }
        write!(f, "{close}")
    }
}

/// A date range between two timestamps, e.g. `<A>--<B>`.
///
/// Only the start's repeater is ever consulted; the expander ignores the
/// end's. The start never lies after the end, checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimestampRange {
    /// Creates a range, rejecting a start date after the end date.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, InvalidRange> {
        if start.moment.date() > end.moment.date() {
            return Err(InvalidRange {
                start: start.moment.date(),
                end: end.moment.date(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> &Timestamp {
        &self.start
    }

    pub const fn end(&self) -> &Timestamp {
        &self.end
    }
}

impl fmt::Display for TimestampRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.start, self.end)
    }
}

/// A parsed timestamp token: either a single timestamp or a range.
///
/// The engine dispatches on this once, at the top of expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimestampValue {
    Single(Timestamp),
    Range(TimestampRange),
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(timestamp) => timestamp.fmt(f),
            Self::Range(range) => range.fmt(f),
        }
    }
}
