//! Start time of the first chunk, as typed by the user or copied from the media library.
//!
//! Accepted forms:
//! - RFC 3339 with an offset: `2024-01-01T10:00:00Z`, `2024-01-01T10:00:00+02:00`
//! - Naive local time: `2024-01-01 10:00`, `2024-01-01T10:00:00`, interpreted in a fixed offset

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::core::error::ParseError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a UTC offset like `+02:00`, `-0530` or `Z`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, ParseError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| ParseError::InvalidTimestamp(format!("offset {}", text)))
}

/// Parse the recording's start time and convert it to UTC.
///
/// # Examples
///
/// ```
/// use chrono::FixedOffset;
/// use retimecore::media::parse_start_time;
///
/// let offset = FixedOffset::east_opt(2 * 3600).unwrap();
/// let utc = parse_start_time("2024-06-01 12:00", offset).unwrap();
/// assert_eq!(utc.to_rfc3339(), "2024-06-01T10:00:00+00:00");
/// ```
pub fn parse_start_time(text: &str, default_offset: FixedOffset) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = text.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return default_offset
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| ParseError::InvalidTimestamp(text.to_string()));
        }
    }

    Err(ParseError::InvalidTimestamp(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    #[test]
    fn test_rfc3339_ignores_default_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let at = parse_start_time("2024-01-01T00:00:00Z", offset).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let at = parse_start_time("2024-01-01T02:00:00+02:00", offset).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_naive_time_uses_default_offset() {
        let zurich_summer = parse_utc_offset("+02:00").unwrap();
        let at = parse_start_time("2023-07-14 18:05:09", zurich_summer).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2023, 7, 14, 16, 5, 9).unwrap());

        let at = parse_start_time("2023-07-14T18:05", utc()).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2023, 7, 14, 18, 5, 0).unwrap());
    }

    #[test]
    fn test_invalid_start_times() {
        for bad in ["", "yesterday", "2024-13-01 00:00", "1704067200"] {
            assert!(parse_start_time(bad, utc()).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("Z").unwrap(), utc());
        assert_eq!(parse_utc_offset("+00:00").unwrap(), utc());
        assert_eq!(
            parse_utc_offset("-05:30").unwrap(),
            FixedOffset::west_opt(5 * 3600 + 1800).unwrap()
        );
        assert!(parse_utc_offset("Europe/Zurich").is_err());
    }
}
