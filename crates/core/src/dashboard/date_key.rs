//! Reduction of record timestamps to calendar-day and calendar-year keys.
//!
//! The calendar date is taken from the timestamp exactly as it is encoded.
//! `2024-07-15T23:30:00-07:00` is keyed `2024-07-15` even though the same
//! instant falls on July 16th in UTC.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::{AggregationError, Category};

const DAY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A record date as supplied by a caller: a native value or an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Instant(DateTime<FixedOffset>),
    Text(String),
}

impl DateInput {
    fn raw(&self) -> String {
        match self {
            DateInput::Date(d) => d.format(DAY_FORMAT).to_string(),
            DateInput::Instant(dt) => dt.to_rfc3339(),
            DateInput::Text(s) => s.clone(),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Date(value.date())
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value.fixed_offset())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

/// Canonical calendar-day key, rendered as `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which for four-digit years is also the
/// lexicographic order of the rendered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The `YYYY` key of the year this day belongs to.
    pub fn year_key(&self) -> String {
        year_key(self.0)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DAY_FORMAT)
            .map(DayKey)
            .map_err(serde::de::Error::custom)
    }
}

/// Reduces a record date to its calendar-day key.
pub fn normalize_day_key(input: &DateInput, category: Category) -> Result<DayKey, AggregationError> {
    let date = match input {
        DateInput::Date(d) => Some(*d),
        DateInput::Instant(dt) => Some(dt.date_naive()),
        DateInput::Text(s) => parse_text_date(s.trim()),
    };

    date.map(DayKey).ok_or_else(|| AggregationError::MalformedDate {
        category,
        raw: input.raw(),
    })
}

/// `YYYY` key for the calendar year of a date.
pub fn year_key(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}

fn parse_text_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(input: impl Into<DateInput>) -> Result<DayKey, AggregationError> {
        normalize_day_key(&input.into(), Category::Harvest)
    }

    #[test]
    fn test_plain_date_string() {
        assert_eq!(key("2024-07-15").unwrap().to_string(), "2024-07-15");
    }

    #[test]
    fn test_datetime_without_offset_truncates() {
        assert_eq!(key("2024-07-15T03:00").unwrap().to_string(), "2024-07-15");
        assert_eq!(key("2024-07-15T21:00:59").unwrap().to_string(), "2024-07-15");
        assert_eq!(key("2024-07-15 21:00:59.123").unwrap().to_string(), "2024-07-15");
    }

    #[test]
    fn test_offset_is_not_converted() {
        // 23:30 at -07:00 is already July 16th in UTC
        assert_eq!(
            key("2024-07-15T23:30:00-07:00").unwrap().to_string(),
            "2024-07-15"
        );
        let instant = DateTime::parse_from_rfc3339("2024-12-31T22:00:00-05:00").unwrap();
        assert_eq!(key(instant).unwrap().to_string(), "2024-12-31");
    }

    #[test]
    fn test_native_date() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(key(d).unwrap().date(), d);
    }

    #[test]
    fn test_malformed_date() {
        let err = key("not-a-date").unwrap_err();
        assert_eq!(
            err,
            AggregationError::MalformedDate {
                category: Category::Harvest,
                raw: "not-a-date".to_string()
            }
        );
        assert!(key("").is_err());
        assert!(key("2024-02-30").is_err());
    }

    #[test]
    fn test_year_key() {
        let k = key("0999-03-04").unwrap();
        assert_eq!(k.year_key(), "0999");
        assert_eq!(year_key(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), "2024");
    }

    #[test]
    fn test_key_order_matches_string_order() {
        let a = key("2023-12-31").unwrap();
        let b = key("2024-01-01").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_date_input_deserializes_untagged() {
        let d: DateInput = serde_json::from_str("\"2024-07-15\"").unwrap();
        assert!(matches!(d, DateInput::Date(_)));
        let i: DateInput = serde_json::from_str("\"2024-07-15T10:00:00+02:00\"").unwrap();
        assert!(matches!(i, DateInput::Instant(_)));
        let t: DateInput = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(t, DateInput::Text("yesterday".to_string()));
    }
}
