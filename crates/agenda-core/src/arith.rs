//! Calendar-correct interval arithmetic.

use agenda_org::{Moment, RepeaterUnit};
use chrono::{Days, Months, NaiveDate, NaiveDateTime, TimeDelta};

/// Adds `amount` repeater units to a moment.
///
/// Hours, days and weeks are fixed durations on the instant; adding hours
/// gives the result time-of-day precision even if the input was date-only.
/// Months and years are calendar-field additions: the day-of-month is clamped
/// to the target month's length and overflow carries into the year.
///
/// Total for every positive amount; saturates at the far end of the supported
/// calendar range instead of failing.
pub fn add_interval(moment: Moment, amount: u32, unit: RepeaterUnit) -> Moment {
    match unit {
        RepeaterUnit::Hour => {
            let instant = moment
                .instant()
                .checked_add_signed(TimeDelta::hours(i64::from(amount)))
                .unwrap_or(NaiveDateTime::MAX);
            Moment::from_instant(instant)
        }
        RepeaterUnit::Day => shift_days(moment, u64::from(amount)),
        RepeaterUnit::Week => shift_days(moment, u64::from(amount) * 7),
        RepeaterUnit::Month => shift_months(moment, amount),
        RepeaterUnit::Year => shift_months(moment, amount.saturating_mul(12)),
    }
}

fn shift_days(moment: Moment, days: u64) -> Moment {
    let date = moment
        .date()
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX);
    keep_time(moment, date)
}

fn shift_months(moment: Moment, months: u32) -> Moment {
    let date = moment
        .date()
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX);
    keep_time(moment, date)
}

fn keep_time(moment: Moment, date: NaiveDate) -> Moment {
    match moment.time() {
        Some(time) => Moment::with_time(date, time),
        None => Moment::date_only(date),
    }
}
