//! The timestamp token grammar.
//!
//! Single tokens: `<2017-05-03 Wed 09:00 ++12h>`: date, optional weekday
//! label, optional `HH:MM` time, optional repeater cookie, in angle brackets
//! (active) or square brackets (inactive). Ranges join two tokens with `--`.
//!
//! Weekday labels are accepted in any language and ignored; the date is the
//! source of truth and `Display` re-renders the label from it.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::moment::Moment;
use crate::repeater::{InvalidRepeater, Repeater};
use crate::timestamp::{InvalidRange, Timestamp, TimestampRange, TimestampValue};

/// Errors from parsing timestamp tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token did not match the grammar at all.
    #[error("malformed timestamp token: {0:?}")]
    Malformed(String),

    /// An active opening bracket paired with an inactive closing one, or
    /// vice versa.
    #[error("mismatched brackets in timestamp token: {0:?}")]
    MismatchedBrackets(String),

    /// The date fields do not name a real calendar day.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The time fields do not name a real time of day.
    #[error("invalid time of day {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// The repeater cookie was present but invalid.
    #[error(transparent)]
    Repeater(#[from] InvalidRepeater),

    /// The range's start date lies after its end date.
    #[error(transparent)]
    Range(#[from] InvalidRange),
}

static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^
          (?P<open>[<\[])
          (?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})
          (?:\s+(?P<weekday>\p{L}+\.?))?
          (?:\s+(?P<hour>\d{1,2}):(?P<minute>\d{2}))?
          (?:\s+(?P<cookie>[.+]\S+))?
          (?P<close>[>\]])$",
    )
    .expect("timestamp pattern compiles")
});

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<start><[^<>]+>|\[[^\[\]]+\])--(?P<end><[^<>]+>|\[[^\[\]]+\])$")
        .expect("range pattern compiles")
});

fn parse_field<T: FromStr>(digits: &str, token: &str) -> Result<T, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::Malformed(token.to_string()))
}

fn parse_single(token: &str) -> Result<Timestamp, ParseError> {
    let captures = SINGLE_RE
        .captures(token.trim())
        .ok_or_else(|| ParseError::Malformed(token.to_string()))?;

    let open = &captures["open"];
    let close = &captures["close"];
    let active = match (open, close) {
        ("<", ">") => true,
        ("[", "]") => false,
        _ => return Err(ParseError::MismatchedBrackets(token.to_string())),
    };

    let year: i32 = parse_field(&captures["year"], token)?;
    let month: u32 = parse_field(&captures["month"], token)?;
    let day: u32 = parse_field(&captures["day"], token)?;
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate {
            year,
            month,
            day,
        })?;

    let moment = match captures.name("hour") {
        Some(hour_match) => {
            let hour: u32 = parse_field(hour_match.as_str(), token)?;
            let minute: u32 = parse_field(&captures["minute"], token)?;
            let time = NaiveTime::from_hms_opt(hour, minute, 0)
                .ok_or(ParseError::InvalidTime { hour, minute })?;
            Moment::with_time(date, time)
        }
        None => Moment::date_only(date),
    };

    let repeater = captures
        .name("cookie")
        .map(|cookie| cookie.as_str().parse::<Repeater>())
        .transpose()?;

    Ok(Timestamp {
        moment,
        repeater,
        active,
    })
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_single(s)
    }
}

impl FromStr for TimestampRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = RANGE_RE
            .captures(s.trim())
            .ok_or_else(|| ParseError::Malformed(s.to_string()))?;
        let start = parse_single(&captures["start"])?;
        let end = parse_single(&captures["end"])?;
        Ok(Self::new(start, end)?)
    }
}

impl FromStr for TimestampValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if RANGE_RE.is_match(s.trim()) {
            Ok(Self::Range(s.parse()?))
        } else {
            Ok(Self::Single(s.parse()?))
        }
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.to_string()
    }
}

impl TryFrom<String> for TimestampRange {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimestampRange> for String {
    fn from(range: TimestampRange) -> Self {
        range.to_string()
    }
}

impl TryFrom<String> for TimestampValue {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimestampValue> for String {
    fn from(value: TimestampValue) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeater::{RepeaterPolicy, RepeaterUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn parses_date_only_token() {
        let timestamp: Timestamp = "<2017-05-03 Wed>".parse().expect("should parse");
        assert_eq!(timestamp.moment, Moment::date_only(date(2017, 5, 3)));
        assert!(timestamp.repeater.is_none());
        assert!(timestamp.active);
    }

    #[test]
    fn weekday_label_is_ignored() {
        // "Do" is a German label on a Thursday date; the date wins.
        let timestamp: Timestamp = "<2017-05-04 Do>".parse().expect("should parse");
        assert_eq!(timestamp.moment.date(), date(2017, 5, 4));
        assert_eq!(timestamp.to_string(), "<2017-05-04 Thu>");
    }

    #[test]
    fn parses_without_weekday_label() {
        let timestamp: Timestamp = "<2017-05-03>".parse().expect("should parse");
        assert_eq!(timestamp.moment.date(), date(2017, 5, 3));
    }

    #[test]
    fn parses_timed_token_with_repeater() {
        let timestamp: Timestamp = "<2017-05-03 Wed 09:00 ++12h>".parse().expect("should parse");
        assert_eq!(
            timestamp.moment.time(),
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        let repeater = timestamp.repeater.expect("has repeater");
        assert_eq!(repeater.policy(), RepeaterPolicy::CatchUp);
        assert_eq!(repeater.amount(), 12);
        assert_eq!(repeater.unit(), RepeaterUnit::Hour);
    }

    #[test]
    fn parses_inactive_token() {
        let timestamp: Timestamp = "[2017-05-03 Wed]".parse().expect("should parse");
        assert!(!timestamp.active);
    }

    #[test]
    fn mismatched_brackets_rejected() {
        assert_eq!(
            "<2017-05-03 Wed]".parse::<Timestamp>(),
            Err(ParseError::MismatchedBrackets(
                "<2017-05-03 Wed]".to_string()
            ))
        );
    }

    #[test]
    fn impossible_date_rejected() {
        assert_eq!(
            "<2017-02-30>".parse::<Timestamp>(),
            Err(ParseError::InvalidDate {
                year: 2017,
                month: 2,
                day: 30,
            })
        );
    }

    #[test]
    fn impossible_time_rejected() {
        assert_eq!(
            "<2017-05-03 Wed 25:00>".parse::<Timestamp>(),
            Err(ParseError::InvalidTime {
                hour: 25,
                minute: 0,
            })
        );
    }

    #[test]
    fn zero_amount_cookie_rejected() {
        assert_eq!(
            "<2017-05-03 Wed +0d>".parse::<Timestamp>(),
            Err(ParseError::Repeater(InvalidRepeater::ZeroAmount))
        );
    }

    #[test]
    fn garbage_rejected() {
        for token in ["", "2017-05-03", "<2017-05-03", "<next tuesday>"] {
            assert!(
                matches!(token.parse::<Timestamp>(), Err(ParseError::Malformed(_))),
                "expected malformed error for {token:?}"
            );
        }
    }

    #[test]
    fn parses_range_token() {
        let range: TimestampRange = "<2017-05-03 Wed>--<2017-05-11 Do>"
            .parse()
            .expect("should parse");
        assert_eq!(range.start().moment.date(), date(2017, 5, 3));
        assert_eq!(range.end().moment.date(), date(2017, 5, 11));
    }

    #[test]
    fn backwards_range_rejected() {
        let result = "<2017-05-11 Do>--<2017-05-03 Wed>".parse::<TimestampRange>();
        assert!(matches!(result, Err(ParseError::Range(_))));
    }

    #[test]
    fn value_dispatches_single_or_range() {
        let single: TimestampValue = "<2017-05-03 Wed>".parse().expect("should parse");
        assert!(matches!(single, TimestampValue::Single(_)));

        let range: TimestampValue = "<2017-05-03 Wed>--<2017-05-11 Do>"
            .parse()
            .expect("should parse");
        assert!(matches!(range, TimestampValue::Range(_)));
    }

    #[test]
    fn render_roundtrip() {
        for token in [
            "<2017-05-03 Wed>",
            "<2017-05-03 Wed 09:00 ++12h>",
            "[2017-05-06 Sat]",
            "<2017-05-03 Wed>--<2017-05-11 Thu>",
        ] {
            let value: TimestampValue = token.parse().expect("should parse");
            assert_eq!(value.to_string(), token, "roundtrip failed for {token}");
        }
    }

    #[test]
    fn serde_uses_token_text() {
        let value: TimestampValue = "<2017-05-03 Wed 09:00 ++12h>".parse().expect("should parse");
        let json = serde_json::to_string(&value).expect("serializes");
        assert_eq!(json, "\"<2017-05-03 Wed 09:00 ++12h>\"");
        let parsed: TimestampValue = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, value);
    }
}
