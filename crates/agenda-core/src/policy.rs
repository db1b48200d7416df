//! Display policies for occurrences already in the past.
//!
//! The `overdue_today = false` behavior for a past single timestamp, for a
//! range already underway, and for a timed repeater with an occurrence
//! earlier today is not pinned down by any recorded agenda behavior. These
//! functions keep each of those choices in one place so a correction touches
//! nothing else in the engine.

use chrono::NaiveDate;

/// The first day a date range contributes occurrences.
///
/// A range already underway collapses its elapsed days into today when
/// overdue collapsing is on; otherwise it keeps its original start.
pub(crate) fn effective_range_start(
    start: NaiveDate,
    today: NaiveDate,
    overdue_today: bool,
) -> NaiveDate {
    if start >= today || !overdue_today {
        start
    } else {
        today
    }
}

/// Whether a past non-repeating timestamp surfaces as an overdue marker.
pub(crate) const fn mark_past_single(overdue_today: bool) -> bool {
    overdue_today
}

/// Whether a timed repeater with an occurrence earlier today gets a marker
/// prepended.
pub(crate) const fn mark_missed_today(past_today: bool, overdue_today: bool) -> bool {
    past_today && overdue_today
}
