use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The outcome of a single trade as recorded by the trading platform.
///
/// Trade logs carry the outcome as a free-form string. Anything other than an
/// exact (case-insensitive) `"true"` or `"false"` becomes `Unknown`, which
/// counts toward the trade total but toward neither wins nor losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Win,
    Loss,
    Unknown,
}

impl TradeOutcome {
    /// Parses the `IsWin` field of a trade log row.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "true" => TradeOutcome::Win,
            "false" => TradeOutcome::Loss,
            _ => TradeOutcome::Unknown,
        }
    }
}

/// A day of the week, numbered Monday = 0 through Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in Monday-first order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The lowercase names accepted by `from_str`, used in error messages.
    pub const NAMES: [&'static str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];

    /// Monday = 0 .. Sunday = 6.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// The capitalized English name, e.g. "Monday".
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Maps a `chrono` weekday onto our Monday-first numbering.
    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        Weekday::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl FromStr for Weekday {
    type Err = CoreError;

    /// Accepts lowercase-insensitive English names ("monday") and the digits
    /// "0" through "6". Anything else is rejected with an error naming the
    /// accepted vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Some(idx) = Weekday::NAMES.iter().position(|name| *name == normalized) {
            return Ok(Weekday::ALL[idx]);
        }
        if let Ok(num) = normalized.parse::<u8>() {
            if num <= 6 {
                return Ok(Weekday::ALL[num as usize]);
            }
        }
        Err(CoreError::InvalidWeekday(s.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
