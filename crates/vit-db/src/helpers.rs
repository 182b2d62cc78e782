//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs RFC 3339).

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp for storage. Fixed microsecond precision with a `Z`
/// suffix keeps stored values lexicographically sortable.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the precision we store, so values returned from
/// a create call compare equal to the same row read back.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::parse_from_rfc3339(&format_datetime(&now))
        .map_or(now, |dt| dt.with_timezone(&Utc))
}

/// Truncate a caller-supplied timestamp to stored precision.
#[must_use]
pub fn truncate_datetime(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&format_datetime(&dt)).map_or(dt, |d| d.with_timezone(&Utc))
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all vit-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Parse a JSON array column (`platforms`, `tags`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON array of `T`.
pub fn parse_json_list<T: serde::de::DeserializeOwned>(s: &str) -> Result<Vec<T>, DatabaseError> {
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid JSON list in column: {e}")))
}

/// Serialize a list for a JSON array column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_list<T: serde::Serialize>(items: &[T]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

/// Turn free text into an FTS5 query: each word becomes a quoted prefix term,
/// so user input can never produce an FTS5 syntax error.
#[must_use]
pub fn fts_query(text: &str) -> Option<String> {
    let terms: Vec<String> = text
        .split_whitespace()
        .map(|w| w.replace('"', ""))
        .filter(|w| !w.is_empty())
        .map(|w| format!("\"{w}\"*"))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

/// Map `EntityType` to the corresponding SQL table name.
#[must_use]
pub const fn entity_type_to_table(entity: vit_core::enums::EntityType) -> &'static str {
    use vit_core::enums::EntityType;
    match entity {
        EntityType::App => "apps",
        EntityType::AppVersion => "app_versions",
        EntityType::Media => "media",
        EntityType::TimelineEvent => "timeline_events",
        EntityType::User => "users",
        EntityType::Organization => "organizations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00.000000Z").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn stored_timestamps_sort_lexicographically() {
        let early = parse_datetime("2026-02-09T14:30:00.5Z").unwrap();
        let late = parse_datetime("2026-02-09T14:30:00.123456Z").unwrap();
        assert!(early > late);
        assert!(format_datetime(&early) > format_datetime(&late));
    }

    #[test]
    fn now_roundtrips_through_storage_format() {
        let t = now();
        assert_eq!(parse_datetime(&format_datetime(&t)).unwrap(), t);
    }

    #[test]
    fn fts_query_quotes_terms() {
        assert_eq!(fts_query("pixel garden").as_deref(), Some("\"pixel\"* \"garden\"*"));
        assert_eq!(fts_query("a\"b OR").as_deref(), Some("\"ab\"* \"OR\"*"));
        assert_eq!(fts_query("   "), None);
    }

    #[test]
    fn enum_parsing() {
        let status: vit_core::enums::AppStatus = parse_enum("in_review").unwrap();
        assert_eq!(status, vit_core::enums::AppStatus::InReview);
        assert!(parse_enum::<vit_core::enums::AppStatus>("live").is_err());
    }
}
