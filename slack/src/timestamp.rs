use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// A Slack `ts` value: seconds since the epoch with microsecond precision, written `"1234.567890"`.
///
/// Message timestamps double as message IDs within a channel, so they are compared exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    microseconds: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Got a string without a .: {0:?}")]
    MissingDot(String),
    #[error("Cannot parse {0:?} as a number")]
    NotANumber(String),
    #[error("Timestamps must have at most 6 decimal places, got {0:?}")]
    TooPrecise(String),
    #[error("Timestamp {0:?} does not fit in 64 bits of microseconds")]
    OutOfRange(String),
}

impl Timestamp {
    /// Fails once `seconds` no longer fits in a `u64` count of microseconds.
    pub fn from_seconds(seconds: u64) -> Result<Self, TimestampError> {
        Self::from_parts(seconds, 0).ok_or_else(|| TimestampError::OutOfRange(seconds.to_string()))
    }

    fn from_parts(seconds: u64, microseconds: u64) -> Option<Self> {
        seconds
            .checked_mul(1_000_000)
            .and_then(|micros| micros.checked_add(microseconds))
            .map(|microseconds| Timestamp { microseconds })
    }

    pub fn as_micros(&self) -> u64 {
        self.microseconds
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> DateTime<Utc> {
        let seconds = ts.microseconds / 1_000_000;
        let nanoseconds = (ts.microseconds % 1_000_000) * 1_000;
        DateTime::from_timestamp(seconds as i64, nanoseconds as u32).unwrap_or_default()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Timestamp {
        Timestamp {
            microseconds: datetime.timestamp().max(0) as u64 * 1_000_000
                + datetime.timestamp_subsec_micros() as u64,
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Timestamp, TimestampError> {
        // Split at the decimal point
        let dot_location = value
            .find('.')
            .ok_or_else(|| TimestampError::MissingDot(value.to_string()))?;
        let (seconds_str, micros_str) = value.split_at(dot_location);
        let micros_str = &micros_str[1..];
        if micros_str.len() > 6 {
            return Err(TimestampError::TooPrecise(value.to_string()));
        }

        // u64::from_str would also take a leading '+'
        if !micros_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimestampError::NotANumber(micros_str.to_string()));
        }
        if seconds_str.is_empty() || !seconds_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimestampError::NotANumber(seconds_str.to_string()));
        }

        let seconds = seconds_str
            .parse::<u64>()
            .map_err(|_| TimestampError::OutOfRange(value.to_string()))?;
        let fraction = if micros_str.is_empty() {
            0
        } else {
            micros_str
                .parse::<u64>()
                .map_err(|_| TimestampError::NotANumber(micros_str.to_string()))?
        };
        // ".5" is half a second, not five microseconds
        let microseconds = fraction * 10u64.pow(6 - micros_str.len() as u32);

        Timestamp::from_parts(seconds, microseconds)
            .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))
    }
}

struct TimestampVisitor;
impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Unix-style timestamp, as a u64 or string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        Timestamp::from_seconds(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.microseconds / 1_000_000,
            self.microseconds % 1_000_000
        )
    }
}
