//! Org-style timestamp values and the timestamp token grammar.
//!
//! This crate contains the value types shared by the agenda engine:
//! - `Moment`: a calendar date with an optional time-of-day
//! - `Repeater`: a repetition rule (`+`, `++`, `.+` cookies)
//! - `Timestamp` / `TimestampRange` / `TimestampValue`: parsed timestamp tokens
//!
//! Tokens look like `<2017-05-03 Wed 09:00 ++12h>`; inactive timestamps use
//! square brackets and ranges join two tokens with `--`. Parsing goes through
//! `FromStr`; rendering through `Display`, which recomputes weekday labels
//! from the date rather than trusting whatever the source text carried.

mod moment;
mod parse;
mod repeater;
mod timestamp;

pub use moment::Moment;
pub use parse::ParseError;
pub use repeater::{InvalidRepeater, Repeater, RepeaterPolicy, RepeaterUnit};
pub use timestamp::{InvalidRange, Timestamp, TimestampRange, TimestampValue};
