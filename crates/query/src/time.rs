//! Time-of-day values used by the "open now" predicate.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time of day '{0}', expected HH:MM")]
pub struct InvalidTimeOfDay(pub String);

/// A 24-hour, zero-padded `HH:MM` string.
///
/// Ordering is plain string ordering. There is no notion of a window that
/// wraps past midnight.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(String);

impl TimeOfDay {
    pub fn from_time(time: NaiveTime) -> Self {
        Self(format!("{:02}:{:02}", time.hour(), time.minute()))
    }

    /// Build from hour and minute, `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::from_time)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 5 {
            return Err(InvalidTimeOfDay(s.to_string()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self::from_time)
            .map_err(|_| InvalidTimeOfDay(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = InvalidTimeOfDay;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
