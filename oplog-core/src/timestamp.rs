//! Timestamp conversion between LokiC2 transcripts and Ghostwriter

use chrono::NaiveDateTime;

/// Format used by LokiC2, minus the trailing timezone token
const LOKI_FORMAT: &str = "%m-%d-%Y %I:%M%p";

/// Format Ghostwriter accepts for `startDate`
pub const GHOSTWRITER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a LokiC2 timestamp such as `06-01-2024 03:45PM UTC`
///
/// The timezone abbreviation must be present but its value is ignored; the
/// result is the wall-clock time as written.
pub fn parse_loki_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let (datetime, zone) = raw.trim().rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    NaiveDateTime::parse_from_str(datetime.trim_end(), LOKI_FORMAT).ok()
}

pub fn format_ghostwriter_timestamp(datetime: &NaiveDateTime) -> String {
    datetime.format(GHOSTWRITER_FORMAT).to_string()
}

/// Converts a LokiC2 timestamp straight into Ghostwriter's format
pub fn convert_timestamp(raw: &str) -> Option<String> {
    parse_loki_timestamp(raw).map(|dt| format_ghostwriter_timestamp(&dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_pm() {
        assert_eq!(
            convert_timestamp("06-01-2024 03:45PM UTC").as_deref(),
            Some("2024-06-01 15:45:00")
        );
    }

    #[test]
    fn test_convert_midnight_and_noon() {
        assert_eq!(
            convert_timestamp("12-31-2023 12:05AM EST").as_deref(),
            Some("2023-12-31 00:05:00")
        );
        assert_eq!(
            convert_timestamp("01-02-2024 12:30PM GMT").as_deref(),
            Some("2024-01-02 12:30:00")
        );
    }

    #[test]
    fn test_lowercase_meridiem() {
        assert_eq!(
            convert_timestamp("06-01-2024 09:15am UTC").as_deref(),
            Some("2024-06-01 09:15:00")
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(convert_timestamp("2024-06-01 15:45:00").is_none());
        assert!(convert_timestamp("06-01-2024 03:45PM").is_none());
        assert!(convert_timestamp("06-01-2024 13:45PM UTC").is_none());
        assert!(convert_timestamp("13-01-2024 03:45PM UTC").is_none());
        assert!(convert_timestamp("06-01-2024 03:45PM +0000").is_none());
        assert!(convert_timestamp("").is_none());
    }
}
