//! Occurrence expansion for the agenda view.
//!
//! Turns a parsed timestamp plus an `AgendaWindow` into the ordered list of
//! concrete occurrences the agenda shows. Missed occurrences collapse into a
//! single synthetic "overdue" marker at today's midnight when the window asks
//! for it; repeating timestamps are enumerated lazily and never beyond the
//! window's end.

use agenda_org::{Moment, Repeater, RepeaterUnit, Timestamp, TimestampRange, TimestampValue};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::arith::add_interval;
use crate::policy;
use crate::window::AgendaWindow;

/// One concrete calendar appearance of a timestamp in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// When the occurrence appears; midnight for whole-day entries.
    pub time: NaiveDateTime,
    /// True only for the single synthetic marker that collapses one or more
    /// missed occurrences into today.
    pub overdue: bool,
}

impl Occurrence {
    /// A real occurrence at the given instant.
    pub const fn at(time: NaiveDateTime) -> Self {
        Self {
            time,
            overdue: false,
        }
    }

    /// The synthetic overdue marker at the given day's midnight.
    pub fn overdue_at(day: NaiveDate) -> Self {
        Self {
            time: day.and_time(NaiveTime::MIN),
            overdue: true,
        }
    }
}

/// Expands a timestamp into the ordered occurrences for an agenda window.
///
/// The result is non-decreasing by instant, every entry lies inside the
/// window, and at most one overdue marker is present, always first. The
/// repeater's policy never changes the expansion: `+`, `++` and `.+` with the
/// same amount and unit produce identical output. The policies
/// differ only in how [`advance`](crate::advance) moves the anchor.
pub fn expand(value: &TimestampValue, window: &AgendaWindow) -> Vec<Occurrence> {
    tracing::trace!(
        token = %value,
        days = window.days(),
        overdue_today = window.overdue_today(),
        "expanding timestamp"
    );
    match value {
        TimestampValue::Single(timestamp) => expand_single(timestamp, window),
        TimestampValue::Range(range) => expand_range(range, window),
    }
}

fn expand_single(timestamp: &Timestamp, window: &AgendaWindow) -> Vec<Occurrence> {
    match timestamp.repeater {
        Some(repeater) => expand_repeating(timestamp.moment, repeater, window),
        None => expand_plain(timestamp.moment, window),
    }
}

/// A non-repeating timestamp: shown as-is inside the window, collapsed to an
/// overdue marker once its day has passed.
fn expand_plain(moment: Moment, window: &AgendaWindow) -> Vec<Occurrence> {
    let today = window.today();
    let date = moment.date();

    if date > today {
        if date < window.end_date() {
            vec![Occurrence::at(moment.instant())]
        } else {
            Vec::new()
        }
    } else if date == today {
        // Kept as-is even if the time-of-day already passed.
        vec![Occurrence::at(moment.instant())]
    } else if policy::mark_past_single(window.overdue_today()) {
        vec![Occurrence::overdue_at(today)]
    } else {
        Vec::new()
    }
}

/// A date range: one whole-day occurrence per day, clipped to the window.
/// Collapsing elapsed days into today is the range's overdue behavior; it
/// never emits a standalone marker, and its repeater (if any) is not
/// expanded.
fn expand_range(range: &TimestampRange, window: &AgendaWindow) -> Vec<Occurrence> {
    if range.start().repeater.is_some() {
        tracing::debug!(token = %range, "repeater on a range is not expanded");
    }

    let today = window.today();
    let end_date = range.end().moment.date();
    let first = policy::effective_range_start(
        range.start().moment.date(),
        today,
        window.overdue_today(),
    );
    if first >= window.end_date() || first > end_date {
        return Vec::new();
    }

    let span_cap = first
        .checked_add_days(Days::new(u64::from(window.days()) - 1))
        .unwrap_or(NaiveDate::MAX);
    let window_cap = window.end_date().pred_opt().unwrap_or(NaiveDate::MAX);
    let last = end_date.min(span_cap).min(window_cap);

    let mut occurrences = Vec::new();
    let mut day = first;
    while day <= last {
        occurrences.push(Occurrence::at(day.and_time(NaiveTime::MIN)));
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    occurrences
}

/// A repeating timestamp: the arithmetic progression of the anchor, clipped
/// to the window.
///
/// Date-only anchors keep every progression day from today on and never get
/// an overdue marker; the day itself is the smallest unit there is. Timed
/// anchors keep the occurrences still ahead of "now" and collapse any
/// occurrence missed earlier today into the marker.
fn expand_repeating(anchor: Moment, repeater: Repeater, window: &AgendaWindow) -> Vec<Occurrence> {
    let today = window.today();
    let progression = Progression::new(anchor, repeater, window.end_date());

    if !anchor.has_time() {
        return progression
            .filter(|moment| moment.date() >= today)
            .map(|moment| Occurrence::at(moment.instant()))
            .collect();
    }

    let now = window.now();
    let mut missed_today = false;
    let mut upcoming = Vec::new();
    for moment in progression {
        let instant = moment.instant();
        if moment.date() == today && instant < now {
            missed_today = true;
        }
        if instant >= now && moment.date() >= today {
            upcoming.push(Occurrence::at(instant));
        }
    }

    let mut occurrences = Vec::new();
    if policy::mark_missed_today(missed_today, window.overdue_today()) {
        occurrences.push(Occurrence::overdue_at(today));
    }
    occurrences.extend(upcoming);
    occurrences
}

/// The arithmetic progression of a repeating anchor, halted once an element's
/// date reaches the window's end so the unbounded series is never
/// materialized.
struct Progression {
    next: Option<Moment>,
    amount: u32,
    unit: RepeaterUnit,
    end_date: NaiveDate,
}

impl Progression {
    fn new(anchor: Moment, repeater: Repeater, end_date: NaiveDate) -> Self {
        Self {
            next: Some(anchor),
            amount: repeater.amount(),
            unit: repeater.unit(),
            end_date,
        }
    }
}

impl Iterator for Progression {
    type Item = Moment;

    fn next(&mut self) -> Option<Moment> {
        let current = self.next.take()?;
        if current.date() >= self.end_date {
            return None;
        }
        self.next = Some(add_interval(current, self.amount, self.unit));
        Some(current)
    }
}
