//! Input checks applied before metric samples are written.

use chrono::{DateTime, SecondsFormat, Utc};

use super::{DbError, DbResult};
use crate::models::now_timestamp;

/// Parse an RFC 3339 timestamp and store it as fixed-width UTC.
///
/// Stored timestamps sort chronologically as text.
pub(crate) fn normalize_timestamp(value: &str) -> DbResult<String> {
    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
        DbError::Constraint(format!("Invalid recorded_at {:?}: {}", value, e))
    })?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Normalized caller timestamp, or the current time when none was given.
pub(crate) fn recorded_at_or_now(value: Option<&str>) -> DbResult<String> {
    match value {
        Some(value) => normalize_timestamp(value),
        None => Ok(now_timestamp()),
    }
}

/// Reject negative and non-finite measurements.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> DbResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DbError::Constraint(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_converted_to_utc() {
        assert_eq!(
            normalize_timestamp("2025-01-01T10:00:00+05:00").unwrap(),
            "2025-01-01T05:00:00.000000Z"
        );
        assert_eq!(
            normalize_timestamp("2025-01-01T06:00:00Z").unwrap(),
            "2025-01-01T06:00:00.000000Z"
        );
    }

    #[test]
    fn test_normalized_is_stable() {
        let once = normalize_timestamp("2025-06-30T23:59:59.5-07:00").unwrap();
        assert_eq!(once, "2025-07-01T06:59:59.500000Z");
        assert_eq!(normalize_timestamp(&once).unwrap(), once);
    }

    #[test]
    fn test_garbage_timestamp_rejected() {
        for value in ["yesterday-ish", "", "2025-01-01", "2025-13-01T00:00:00Z"] {
            assert!(
                matches!(normalize_timestamp(value), Err(DbError::Constraint(_))),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_missing_timestamp_defaults_to_now() {
        let ts = recorded_at_or_now(None).unwrap();
        assert_eq!(normalize_timestamp(&ts).unwrap(), ts);
    }

    #[test]
    fn test_non_negative() {
        assert!(ensure_non_negative("steps", 0.0).is_ok());
        assert!(ensure_non_negative("glucose_level", 95.5).is_ok());
        assert!(matches!(
            ensure_non_negative("glucose_level", -2.0),
            Err(DbError::Constraint(_))
        ));
        assert!(ensure_non_negative("sleep_duration", f64::NAN).is_err());
        assert!(ensure_non_negative("sleep_duration", f64::INFINITY).is_err());
    }
}
