//! Calendar date keys.
//!
//! # Responsibility
//! - Represent one local calendar day as a strict `YYYY-MM-DD` key.
//! - Provide day arithmetic and day-range helpers for analytics.
//!
//! # Invariants
//! - A `DateKey` always names a real calendar day.
//! - Text form is zero-padded `YYYY-MM-DD`; anything else is rejected.

use chrono::{Days, Local, NaiveDate, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date key regex"));

/// Error returned when text cannot be parsed as a date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Text is not shaped like `YYYY-MM-DD`.
    Format(String),
    /// Text is well-shaped but names no calendar day (e.g. `2026-02-30`).
    Calendar(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => write!(f, "date key `{value}` must use YYYY-MM-DD"),
            Self::Calendar(value) => write!(f, "date key `{value}` is not a calendar day"),
        }
    }
}

impl Error for DateKeyError {}

/// One local calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a strict `YYYY-MM-DD` key.
    ///
    /// # Errors
    /// - `DateKeyError::Format` for non-padded or otherwise malformed text.
    /// - `DateKeyError::Calendar` for impossible dates.
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        if !DATE_KEY_RE.is_match(value) {
            return Err(DateKeyError::Format(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::Calendar(value.to_string()))
    }

    /// Today in the local time zone.
    pub fn local_today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Local calendar day containing the given epoch-milliseconds instant.
    ///
    /// Returns `None` for instants chrono cannot represent.
    pub fn from_epoch_ms(epoch_ms: i64) -> Option<Self> {
        Local
            .timestamp_millis_opt(epoch_ms)
            .single()
            .map(|instant| Self(instant.date_naive()))
    }

    /// Epoch milliseconds of local noon on this day.
    pub fn local_noon_epoch_ms(self) -> i64 {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        let naive = self.0.and_time(noon);
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|instant| instant.timestamp_millis())
            .unwrap_or_else(|| naive.and_utc().timestamp_millis())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The day `days` calendar days earlier, saturating at the earliest
    /// representable date.
    pub fn days_before(self, days: u32) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    /// The day `days` calendar days later, saturating at the latest
    /// representable date.
    pub fn days_after(self, days: u32) -> Self {
        Self(
            self.0
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX),
        )
    }
}

/// The `count` days ending at `end` (inclusive), oldest first.
pub fn last_n_days(end: DateKey, count: u32) -> Vec<DateKey> {
    (0..count).rev().map(|offset| end.days_before(offset)).collect()
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{last_n_days, DateKey, DateKeyError};

    fn key(value: &str) -> DateKey {
        DateKey::parse(value).expect("valid date key")
    }

    #[test]
    fn parse_accepts_padded_keys_and_round_trips_display() {
        assert_eq!(key("2026-03-09").to_string(), "2026-03-09");
    }

    #[test]
    fn parse_rejects_unpadded_and_impossible_dates() {
        assert!(matches!(
            DateKey::parse("2026-3-9"),
            Err(DateKeyError::Format(_))
        ));
        assert!(matches!(
            DateKey::parse("2026-02-30"),
            Err(DateKeyError::Calendar(_))
        ));
        assert!(matches!(
            DateKey::parse(" 2026-03-09"),
            Err(DateKeyError::Format(_))
        ));
    }

    #[test]
    fn day_arithmetic_crosses_month_and_year_boundaries() {
        assert_eq!(key("2026-03-01").days_before(1), key("2026-02-28"));
        assert_eq!(key("2024-03-01").days_before(1), key("2024-02-29"));
        assert_eq!(key("2025-12-31").days_after(1), key("2026-01-01"));
    }

    #[test]
    fn last_n_days_is_oldest_first_and_ends_at_end() {
        let days = last_n_days(key("2026-01-02"), 4);
        let rendered: Vec<String> = days.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["2025-12-30", "2025-12-31", "2026-01-01", "2026-01-02"]
        );
        assert!(last_n_days(key("2026-01-02"), 0).is_empty());
    }

    #[test]
    fn local_noon_maps_back_to_same_day() {
        let day = key("2026-07-15");
        assert_eq!(DateKey::from_epoch_ms(day.local_noon_epoch_ms()), Some(day));
    }

    #[test]
    fn serde_uses_plain_string_form() {
        let json = serde_json::to_string(&key("2026-10-17")).expect("serialize");
        assert_eq!(json, "\"2026-10-17\"");
        let parsed: DateKey = serde_json::from_str("\"2026-10-17\"").expect("deserialize");
        assert_eq!(parsed, key("2026-10-17"));
        assert!(serde_json::from_str::<DateKey>("\"17/10/2026\"").is_err());
    }
}
