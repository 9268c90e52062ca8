//! Serde adapter for ISO-8601 timestamps with millisecond precision.
//!
//! Output always looks like `2024-05-01T08:30:00.000Z`. Input accepts any
//! RFC 3339 string and normalizes it to UTC. Date-only values mean UTC
//! midnight; date-times without an offset are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats `value` as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_iso_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an ISO-8601 timestamp into UTC.
pub fn parse_iso(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|rfc_err| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
                .or_else(|_| {
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
                })
                .map_err(|_| rfc_err)
        })
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso_millis(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso(&raw).map_err(|err| {
        serde::de::Error::custom(format!("invalid ISO-8601 timestamp `{raw}`: {err}"))
    })
}
