//! Anchor advancement for repeating timestamps whose task was completed.

use agenda_org::{Moment, RepeaterPolicy, Timestamp};
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::arith::add_interval;

/// Precondition violation: advancement only applies to repeating timestamps.
///
/// Distinct from the construction-time validation errors; hitting this means
/// the caller's completion workflow asked for something that has no meaning.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot advance a timestamp without a repeater")]
pub struct MissingRepeater;

/// Moves a repeating timestamp's anchor after its task is completed.
///
/// The repeater and the active flag carry over unchanged; only the moment
/// moves, according to the repeater's policy:
/// - `+` shifts exactly one interval past the old anchor, however stale,
/// - `++` catches up to the first slot strictly after the completion time,
/// - `.+` restarts the interval from the completion time itself.
///
/// Rendering the result recomputes the weekday label from the new date.
pub fn advance(
    timestamp: &Timestamp,
    completed_at: NaiveDateTime,
) -> Result<Timestamp, MissingRepeater> {
    let repeater = timestamp.repeater.ok_or(MissingRepeater)?;

    let moment = match repeater.policy() {
        RepeaterPolicy::Shift => {
            add_interval(timestamp.moment, repeater.amount(), repeater.unit())
        }
        RepeaterPolicy::CatchUp => {
            let mut next = add_interval(timestamp.moment, repeater.amount(), repeater.unit());
            while next.instant() <= completed_at {
                let stepped = add_interval(next, repeater.amount(), repeater.unit());
                if stepped == next {
                    // Saturated at the calendar's end; no later slot exists.
                    break;
                }
                next = stepped;
            }
            next
        }
        RepeaterPolicy::Restart => {
            // The stale anchor is discarded; the interval restarts from the
            // completion moment, at the anchor's original granularity.
            let base = if timestamp.moment.has_time() {
                Moment::from_instant(completed_at)
            } else {
                Moment::date_only(completed_at.date())
            };
            add_interval(base, repeater.amount(), repeater.unit())
        }
    };

    tracing::debug!(
        from = %timestamp.moment,
        to = %moment,
        policy = ?repeater.policy(),
        "advanced repeating timestamp"
    );

    Ok(Timestamp { moment, ..*timestamp })
}
