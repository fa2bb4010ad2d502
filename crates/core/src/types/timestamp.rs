//! Lenient timestamp decoding.
//!
//! The record store serializes timestamps as RFC 3339 strings, but older
//! records carry `null`, empty strings or garbage. All of those decode to
//! `None` so the record still loads and is simply left out of time-bounded
//! statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional RFC 3339 timestamp, mapping anything unparseable
/// to `None`.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails to produce a value at all.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_value))
}

/// Serialize an optional timestamp as RFC 3339 (or `null`).
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

fn parse_value(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        // Millisecond epoch numbers show up in hand-imported records.
        serde_json::Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, with = "super")]
        at: Option<DateTime<Utc>>,
    }

    fn probe(json: &str) -> Option<DateTime<Utc>> {
        serde_json::from_str::<Probe>(json).unwrap().at
    }

    #[test]
    fn test_parses_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(probe(r#"{"at":"2025-03-01T12:00:00.000Z"}"#), Some(expected));
        assert_eq!(probe(r#"{"at":"2025-03-01T14:00:00+02:00"}"#), Some(expected));
    }

    #[test]
    fn test_missing_or_malformed_is_none() {
        assert_eq!(probe("{}"), None);
        assert_eq!(probe(r#"{"at":null}"#), None);
        assert_eq!(probe(r#"{"at":""}"#), None);
        assert_eq!(probe(r#"{"at":"yesterday"}"#), None);
        assert_eq!(probe(r#"{"at":{"seconds":1}}"#), None);
    }

    #[test]
    fn test_epoch_millis() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(probe(r#"{"at":1704067200000}"#), Some(expected));
    }
}
