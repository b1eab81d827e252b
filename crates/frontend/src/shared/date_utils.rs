/// Utilities for date and time formatting
///
/// Timestamps come from the API as RFC 3339 strings. Anything that does not
/// parse is shown as-is.
use chrono::{DateTime, Duration, FixedOffset, Utc};

fn parse(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
pub fn format_datetime(value: &str) -> String {
    match parse(value) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// "2024-03-15T14:02:26Z" -> "2024-03-15"
pub fn format_date(value: &str) -> String {
    match parse(value) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => value.split('T').next().unwrap_or(value).to_string(),
    }
}

/// "just now", "5 minutes ago", "3 days ago"; older than a month falls back
/// to the date.
pub fn format_relative(value: &str, now: DateTime<Utc>) -> String {
    let Some(dt) = parse(value) else {
        return value.to_string();
    };
    let elapsed = now.signed_duration_since(dt.with_timezone(&Utc));
    if elapsed < Duration::minutes(1) {
        return "just now".to_string();
    }
    let (n, unit) = if elapsed < Duration::hours(1) {
        (elapsed.num_minutes(), "minute")
    } else if elapsed < Duration::days(1) {
        (elapsed.num_hours(), "hour")
    } else if elapsed < Duration::days(30) {
        (elapsed.num_days(), "day")
    } else {
        return format_date(value);
    };
    format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+03:00"), "2024-12-31 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15T14:02:26Z"), "2024-03-15");
        assert_eq!(format_date("2024-03-15"), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_relative("yesterday", now()), "yesterday");
    }

    #[test]
    fn test_relative() {
        assert_eq!(format_relative("2024-03-15T11:59:30Z", now()), "just now");
        assert_eq!(format_relative("2024-03-15T11:59:00Z", now()), "1 minute ago");
        assert_eq!(format_relative("2024-03-15T09:00:00Z", now()), "3 hours ago");
        assert_eq!(format_relative("2024-03-13T12:00:00Z", now()), "2 days ago");
        assert_eq!(format_relative("2024-01-01T00:00:00Z", now()), "2024-01-01");
    }
}
