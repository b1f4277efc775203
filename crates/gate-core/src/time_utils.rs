use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve an IANA timezone name, falling back to UTC with a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{}\", falling back to UTC", tz_name);
        Tz::UTC
    })
}

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a backend timestamp string into a UTC [`DateTime`].
///
/// Accepts RFC 3339 (with `Z` or a fixed offset) and the naive ISO forms the
/// backend emits for columns stored without a zone. Naive values are read
/// as UTC. Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

/// Parse a JSON value (string or Unix seconds) into a UTC [`DateTime`].
pub fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                let f = n.as_f64()?;
                let secs = f.trunc() as i64;
                let nanos = (f.fract() * 1_000_000_000.0).round() as u32;
                DateTime::from_timestamp(secs, nanos)
            }
        }
        _ => None,
    }
}

// ── 12-hour / 24-hour format detection ───────────────────────────────────────

/// Timezone prefixes whose users conventionally read a 12-hour clock.
const TWELVE_HOUR_PREFIXES: &[&str] = &[
    "America/",
    "US/",
    "Canada/",
    "Australia/",
    "Pacific/Auckland",
    "Asia/Manila",
    "Asia/Kolkata",
    "Asia/Karachi",
];

/// Decide whether to use a 12-hour clock.
///
/// An explicit `"12h"` / `"24h"` wins; otherwise the timezone name decides.
pub fn detect_time_format(timezone: &str, explicit: Option<&str>) -> bool {
    if let Some(fmt) = explicit {
        match fmt.to_lowercase().as_str() {
            "12h" => return true,
            "24h" => return false,
            _ => {}
        }
    }
    TWELVE_HOUR_PREFIXES
        .iter()
        .any(|prefix| timezone.starts_with(prefix))
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Format an access-attempt instant as a local date and time string.
///
/// * 24-hour: `"2024-01-15 14:30:05"`
/// * 12-hour: `"2024-01-15 02:30:05 PM"`
pub fn format_log_time(dt: &DateTime<Utc>, tz: Tz, use_12h: bool) -> String {
    let local = dt.with_timezone(&tz);
    if use_12h {
        local.format("%Y-%m-%d %I:%M:%S %p").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_z_suffix() {
        let dt = parse_timestamp("2024-01-15T08:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let dt = parse_timestamp("2024-01-15T08:30:00.123456").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "08:30:00");

        let dt = parse_timestamp("2024-01-15 08:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_empty_and_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_parse_timestamp_value_unix_seconds() {
        let dt = parse_timestamp_value(&serde_json::json!(1_705_307_400)).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_value_null() {
        assert!(parse_timestamp_value(&Value::Null).is_none());
        assert!(parse_timestamp_value(&serde_json::json!(true)).is_none());
    }

    #[test]
    fn test_resolve_timezone_invalid_falls_back_to_utc() {
        assert_eq!(resolve_timezone("Not/AZone"), Tz::UTC);
        assert_eq!(resolve_timezone("Europe/Warsaw"), Tz::Europe__Warsaw);
    }

    #[test]
    fn test_detect_time_format() {
        assert!(detect_time_format("Europe/Warsaw", Some("12h")));
        assert!(!detect_time_format("America/New_York", Some("24h")));
        assert!(detect_time_format("America/New_York", None));
        assert!(!detect_time_format("Europe/Warsaw", None));
        assert!(!detect_time_format("Europe/Warsaw", Some("auto")));
    }

    #[test]
    fn test_format_log_time_converts_zone() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 13, 5, 9).unwrap();
        assert_eq!(
            format_log_time(&dt, Tz::Europe__Warsaw, false),
            "2024-01-15 14:05:09"
        );
        assert_eq!(format_log_time(&dt, Tz::UTC, true), "2024-01-15 01:05:09 PM");
    }

    #[test]
    fn test_get_system_timezone_returns_nonempty_string() {
        assert!(!get_system_timezone().is_empty());
    }
}
