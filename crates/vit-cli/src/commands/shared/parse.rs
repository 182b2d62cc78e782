use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// Parse a `snake_case` enum value using serde deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_opt_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|r| parse_enum(r, field)).transpose()
}

pub fn parse_enums<T>(raw: &[String], field: &str) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    raw.iter().map(|r| parse_enum(r, field)).collect()
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_datetime(raw: Option<&str>, field: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
    raw.map(|r| {
        DateTime::parse_from_rfc3339(r.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|error| anyhow::anyhow!("invalid {field} '{r}': {error}"))
    })
    .transpose()
}
