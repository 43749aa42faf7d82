//! Server timestamp parsing.
//!
//! The backend serializes instants as `yyyy-MM-dd HH:mm:ss` in its own zone
//! (UTC+7); some endpoints emit RFC 3339 instead. Both parse to UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const SERVER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SERVER_OFFSET_SECS: i32 = 7 * 3600;

pub fn server_offset() -> FixedOffset {
    FixedOffset::east_opt(SERVER_OFFSET_SECS).expect("UTC+7 is a valid offset")
}

/// Parses a server timestamp. Accepts RFC 3339, the server's local format,
/// and a bare date (midnight server time).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, SERVER_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    server_offset()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let local = value.with_timezone(&server_offset());
    serializer.serialize_str(&local.format(SERVER_FORMAT).to_string())
}

/// `Option` variant for fields the server may omit or null out.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'"))),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_server_format_is_utc_plus_seven() {
        let dt = parse("2024-03-01 09:30:00").unwrap();
        assert_eq!(dt.hour(), 2);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_rfc3339_passes_through() {
        let dt = parse("2024-03-01T09:30:00Z").unwrap();
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_bare_date_is_server_midnight() {
        let dt = parse("2024-03-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-29T17:00:00+00:00");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse("yesterday").is_none());
    }
}
