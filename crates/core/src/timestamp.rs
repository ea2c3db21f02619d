//! Lenient timestamp parsing for request bodies and query strings.
//!
//! Clients send either RFC 3339 (`2024-05-01T10:00:00Z`) or a bare local
//! date-time as produced by `<input type="datetime-local">`
//! (`2024-05-01T10:00`, seconds and fraction optional). Bare values carry no
//! offset and are taken as UTC. A bare date means midnight UTC.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::types::Timestamp;

/// Accepted layouts for timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a timestamp in any of the accepted layouts.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("Invalid timestamp '{value}'"))
}

/// `deserialize_with` helper for `Option<Timestamp>` fields.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_timestamp(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<Timestamp>,
    }

    #[test]
    fn rfc3339_with_offset_is_normalized_to_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn bare_local_datetime_is_utc() {
        let ts = parse_timestamp("2024-05-01T10:30").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 5, 1));
        assert_eq!((ts.hour(), ts.minute()), (10, 30));
    }

    #[test]
    fn fractional_seconds_accepted() {
        assert!(parse_timestamp("2024-05-01T10:30:15.250").is_ok());
    }

    #[test]
    fn bare_date_is_midnight() {
        let ts = parse_timestamp("2024-05-01").unwrap();
        assert_eq!((ts.day(), ts.hour(), ts.minute()), (1, 0, 0));
    }

    #[test]
    fn garbage_rejected() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.contains("yesterday"));
    }

    #[test]
    fn optional_field_handles_absent_null_and_blank() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert!(absent.at.is_none());
        let null: Probe = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());
        let blank: Probe = serde_json::from_str(r#"{"at": ""}"#).unwrap();
        assert!(blank.at.is_none());
        let set: Probe = serde_json::from_str(r#"{"at": "2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(set.at.unwrap().day(), 2);
    }

    #[test]
    fn optional_field_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"at": "soon"}"#).is_err());
    }
}
