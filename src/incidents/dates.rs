//! Human-readable renderings of millisecond epoch timestamps.

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone};
use serde_json::{Number, Value};

use super::Record;

/// Output pattern for readable timestamps, e.g. `24.12.2024 18:05`.
pub const READABLE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Top-level timestamp fields that get a `<field>_readable` companion.
pub const TIMESTAMP_FIELDS: [&str; 3] = ["publication", "validFrom", "validTo"];

/// Bounds inside `publicationDuration` and each `incidentDurations` entry.
pub const DURATION_BOUNDS: [&str; 2] = ["from", "to"];

/// Time zone in which readable timestamps are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The zone of the machine running the conversion.
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Renders `millis` since the Unix epoch as `DD.MM.YYYY HH:MM`.
    ///
    /// Returns `None` when the instant falls outside years 1 to 9999.
    pub fn format_millis(self, millis: i64) -> Option<String> {
        let instant = DateTime::from_timestamp_millis(millis)?;
        match self {
            DisplayZone::Local => render(instant.with_timezone(&chrono::Local)),
            DisplayZone::Utc => render(instant),
        }
    }

    /// Renders a JSON integer timestamp, falling back to the number's own
    /// text when it cannot be represented as a date.
    pub fn format_timestamp(self, raw: &Number) -> String {
        raw.as_i64()
            .and_then(|millis| self.format_millis(millis))
            .unwrap_or_else(|| raw.to_string())
    }
}

fn render<Tz: TimeZone>(instant: DateTime<Tz>) -> Option<String>
where
    Tz::Offset: Display,
{
    if !(1..=9999).contains(&instant.year()) {
        return None;
    }
    Some(instant.format(READABLE_FORMAT).to_string())
}

/// Renders `millis` in local time, or returns it as a string if it is out of
/// range.
pub fn format_timestamp(millis: i64) -> String {
    DisplayZone::Local
        .format_millis(millis)
        .unwrap_or_else(|| millis.to_string())
}

/// Integer JSON numbers only; floats, strings and booleans are not timestamps.
fn as_timestamp(value: &Value) -> Option<&Number> {
    match value {
        Value::Number(n) if is_integer(n) => Some(n),
        _ => None,
    }
}

/// Numbers keep their source text, so integers too large for `i64`/`u64`
/// are recognised by the absence of a fraction or exponent.
fn is_integer(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || !n.to_string().contains(['.', 'e', 'E'])
}

fn add_readable_fields(record: &Record, fields: &[&str], zone: DisplayZone) -> Record {
    let mut converted = record.clone();

    for field in fields {
        let readable = converted
            .get(*field)
            .and_then(as_timestamp)
            .map(|raw| zone.format_timestamp(raw));

        if let Some(readable) = readable {
            converted.insert(format!("{field}_readable"), Value::String(readable));
        }
    }

    converted
}

/// Adds `_readable` companions for the timestamps of an incident.
///
/// Covers `publication`, `validFrom`, `validTo`, the `from`/`to` bounds of
/// `publicationDuration`, and those of every object in `incidentDurations`.
/// Non-object duration entries are kept as they are.
pub fn add_readable_dates(incident: &Record, zone: DisplayZone) -> Record {
    let mut converted = add_readable_fields(incident, &TIMESTAMP_FIELDS, zone);

    let publication = match converted.get("publicationDuration") {
        Some(Value::Object(duration)) => {
            Some(add_readable_fields(duration, &DURATION_BOUNDS, zone))
        }
        _ => None,
    };
    if let Some(duration) = publication {
        converted.insert("publicationDuration".to_string(), Value::Object(duration));
    }

    let durations = match converted.get("incidentDurations") {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(duration) => {
                        Value::Object(add_readable_fields(duration, &DURATION_BOUNDS, zone))
                    }
                    other => other.clone(),
                })
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };
    if let Some(durations) = durations {
        converted.insert("incidentDurations".to_string(), Value::Array(durations));
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn readable_pattern() -> Regex {
        Regex::new(r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}$").unwrap()
    }

    #[test]
    fn test_utc_rendering() {
        // 2024-01-01T12:00:45Z
        assert_eq!(
            DisplayZone::Utc.format_millis(1_704_110_445_000).as_deref(),
            Some("01.01.2024 12:00")
        );
        assert_eq!(
            DisplayZone::Utc.format_millis(0).as_deref(),
            Some("01.01.1970 00:00")
        );
    }

    #[test]
    fn test_negative_timestamps_are_dates() {
        assert_eq!(
            DisplayZone::Utc.format_millis(-1).as_deref(),
            Some("31.12.1969 23:59")
        );
        let pattern = readable_pattern();
        for millis in [-1, -1_000_000, -9_999_999_999_999] {
            assert!(pattern.is_match(&format_timestamp(millis)), "{millis}");
        }
    }

    #[test]
    fn test_local_rendering_has_readable_shape() {
        let pattern = readable_pattern();
        for millis in [0, 1000, 1_704_110_445_000, 9_999_999_999_999] {
            assert!(pattern.is_match(&format_timestamp(millis)), "{millis}");
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_raw_value() {
        assert_eq!(format_timestamp(999_999_999_999_999_999), "999999999999999999");
        assert_eq!(format_timestamp(i64::MIN), i64::MIN.to_string());
        // Year 10000 is past the four-digit year range.
        assert_eq!(DisplayZone::Utc.format_millis(253_402_300_800_000), None);
    }

    #[test]
    fn test_unsigned_beyond_i64_falls_back() {
        let raw = Number::from(u64::MAX);
        assert_eq!(DisplayZone::Utc.format_timestamp(&raw), u64::MAX.to_string());
    }

    #[test]
    fn test_integers_beyond_u64_fall_back_to_source_text() {
        let incident: Record = serde_json::from_str(
            r#"{"publication": 100000000000000000000, "validFrom": -9223372036854775809}"#,
        )
        .unwrap();
        let result = add_readable_dates(&incident, DisplayZone::Utc);

        assert_eq!(result["publication_readable"], "100000000000000000000");
        assert_eq!(result["validFrom_readable"], "-9223372036854775809");
        assert_eq!(result["publication"].to_string(), "100000000000000000000");
    }

    #[test]
    fn test_fraction_and_exponent_are_not_integers() {
        let incident: Record =
            serde_json::from_str(r#"{"publication": 1.0, "validFrom": 1e3, "validTo": 2E3}"#)
                .unwrap();

        assert_eq!(add_readable_dates(&incident, DisplayZone::Utc), incident);
    }

    #[test]
    fn test_top_level_fields() {
        let incident = record(json!({
            "publication": 1_704_110_445_000_i64,
            "validFrom": 1_704_110_445_000_i64,
            "validTo": 1_704_117_645_000_i64,
        }));
        let result = add_readable_dates(&incident, DisplayZone::Utc);

        assert_eq!(result["publication"], 1_704_110_445_000_i64);
        assert_eq!(result["publication_readable"], "01.01.2024 12:00");
        assert_eq!(result["validFrom_readable"], "01.01.2024 12:00");
        assert_eq!(result["validTo_readable"], "01.01.2024 14:00");
    }

    #[test]
    fn test_non_integer_fields_are_skipped() {
        let incident = record(json!({
            "publication": "1704110445000",
            "validFrom": 1.5,
            "validTo": true,
        }));
        let result = add_readable_dates(&incident, DisplayZone::Utc);

        assert_eq!(result, incident);
    }

    #[test]
    fn test_out_of_range_field_keeps_raw_text() {
        let incident = record(json!({"validTo": 999_999_999_999_999_999_i64}));
        let result = add_readable_dates(&incident, DisplayZone::Local);

        assert_eq!(result["validTo_readable"], "999999999999999999");
    }

    #[test]
    fn test_publication_duration() {
        let incident = record(json!({
            "publicationDuration": {"from": 0, "to": 60_000, "note": "kept"}
        }));
        let result = add_readable_dates(&incident, DisplayZone::Utc);

        assert_eq!(
            result["publicationDuration"],
            json!({
                "from": 0,
                "to": 60_000,
                "note": "kept",
                "from_readable": "01.01.1970 00:00",
                "to_readable": "01.01.1970 00:01",
            })
        );
        assert!(incident["publicationDuration"].get("from_readable").is_none());
    }

    #[test]
    fn test_publication_duration_not_an_object() {
        let incident = record(json!({"publicationDuration": [0, 1]}));
        assert_eq!(add_readable_dates(&incident, DisplayZone::Utc), incident);
    }

    #[test]
    fn test_incident_durations() {
        let incident = record(json!({
            "incidentDurations": [
                {"from": 0, "to": 60_000},
                {"from": null},
                "not a duration",
            ]
        }));
        let result = add_readable_dates(&incident, DisplayZone::Utc);

        assert_eq!(
            result["incidentDurations"],
            json!([
                {"from": 0, "to": 60_000, "from_readable": "01.01.1970 00:00", "to_readable": "01.01.1970 00:01"},
                {"from": null},
                "not a duration",
            ])
        );
    }

    #[test]
    fn test_record_without_timestamps_is_unchanged() {
        let incident = record(json!({"type": "INCIDENT", "title": "Test"}));
        assert_eq!(add_readable_dates(&incident, DisplayZone::Local), incident);
    }
}
