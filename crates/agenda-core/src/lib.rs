//! Occurrence expansion and repeater advancement for org-style agendas.
//!
//! This crate contains the engine behind the agenda view:
//! - interval arithmetic: calendar-correct addition of repeater units
//! - expansion: turning a timestamp plus a bounded window into the ordered
//!   occurrences the agenda shows, including overdue collapsing
//! - advancement: moving a repeating timestamp's anchor when its task is
//!   completed
//!
//! Everything is a pure function of its arguments; "now" is always passed in
//! explicitly, so results are deterministic and callers may invoke the engine
//! from any number of threads without coordination.

mod advance;
mod arith;
mod expand;
mod policy;
mod window;

pub use advance::{MissingRepeater, advance};
pub use arith::add_interval;
pub use expand::{Occurrence, expand};
pub use window::{AgendaWindow, InvalidWindow};
