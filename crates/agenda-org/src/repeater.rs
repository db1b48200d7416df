//! Repetition rules attached to timestamps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for repeater cookies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRepeater {
    /// The interval amount was zero.
    #[error("repeater amount must be positive")]
    ZeroAmount,

    /// The unit suffix was not one of `h d w m y`.
    #[error("unknown repeater unit: {0:?}")]
    UnknownUnit(char),

    /// The cookie text did not match `+N<unit>`, `++N<unit>` or `.+N<unit>`.
    #[error("malformed repeater cookie: {0:?}")]
    Malformed(String),
}

/// What happens to the anchor when the owning task is completed.
///
/// The policy never changes how a timestamp expands in the agenda; all three
/// produce the same occurrence list. It only controls where the anchor lands
/// on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeaterPolicy {
    /// `+`: move exactly one interval past the old anchor.
    Shift,
    /// `++`: skip missed intervals, landing strictly after the completion time.
    CatchUp,
    /// `.+`: restart the interval from the completion time.
    Restart,
}

impl RepeaterPolicy {
    /// The cookie prefix for this policy.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Shift => "+",
            Self::CatchUp => "++",
            Self::Restart => ".+",
        }
    }
}

/// The calendar unit of a repetition interval.
///
/// Hours, days and weeks are fixed durations; months and years are
/// calendar-field units whose length depends on where the anchor sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeaterUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RepeaterUnit {
    /// The single-letter suffix used in cookie text.
    pub const fn suffix(self) -> char {
        match self {
            Self::Hour => 'h',
            Self::Day => 'd',
            Self::Week => 'w',
            Self::Month => 'm',
            Self::Year => 'y',
        }
    }

    /// Parses a cookie suffix letter.
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'h' => Some(Self::Hour),
            'd' => Some(Self::Day),
            'w' => Some(Self::Week),
            'm' => Some(Self::Month),
            'y' => Some(Self::Year),
            _ => None,
        }
    }
}

/// A repetition rule: policy, amount and unit, e.g. `++12h`.
///
/// The amount is always positive; construction rejects zero so the expansion
/// and advancement algorithms never have to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Repeater {
    policy: RepeaterPolicy,
    amount: u32,
    unit: RepeaterUnit,
}

impl Repeater {
    /// Creates a repeater, rejecting a zero amount.
    pub const fn new(
        policy: RepeaterPolicy,
        amount: u32,
        unit: RepeaterUnit,
    ) -> Result<Self, InvalidRepeater> {
        if amount == 0 {
            return Err(InvalidRepeater::ZeroAmount);
        }
        Ok(Self {
            policy,
            amount,
            unit,
        })
    }

    pub const fn policy(self) -> RepeaterPolicy {
        self.policy
    }

    pub const fn amount(self) -> u32 {
        self.amount
    }

    pub const fn unit(self) -> RepeaterUnit {
        self.unit
    }
}

impl fmt::Display for Repeater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.policy.marker(),
            self.amount,
            self.unit.suffix()
        )
    }
}

impl FromStr for Repeater {
    type Err = InvalidRepeater;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ".+" must be tried before "+".
        let (policy, rest) = if let Some(rest) = s.strip_prefix(".+") {
            (RepeaterPolicy::Restart, rest)
        } else if let Some(rest) = s.strip_prefix("++") {
            (RepeaterPolicy::CatchUp, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (RepeaterPolicy::Shift, rest)
        } else {
            return Err(InvalidRepeater::Malformed(s.to_string()));
        };

        let Some(unit_char) = rest.chars().last() else {
            return Err(InvalidRepeater::Malformed(s.to_string()));
        };
        let digits = &rest[..rest.len() - unit_char.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRepeater::Malformed(s.to_string()));
        }

        let amount: u32 = digits
            .parse()
            .map_err(|_| InvalidRepeater::Malformed(s.to_string()))?;
        let unit =
            RepeaterUnit::from_suffix(unit_char).ok_or(InvalidRepeater::UnknownUnit(unit_char))?;
        Self::new(policy, amount, unit)
    }
}

impl TryFrom<String> for Repeater {
    type Error = InvalidRepeater;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Repeater> for String {
    fn from(repeater: Repeater) -> Self {
        repeater.to_string()
    }
}
