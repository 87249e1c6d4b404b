/// Utilities for date and time formatting
///
/// Backend timestamps are RFC 3339 strings; anything else is shown as-is.
use chrono::{DateTime, NaiveDate, Utc};

/// Format ISO datetime string to DD.MM.YYYY HH:MM
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    match DateTime::parse_from_rfc3339(datetime_str) {
        Ok(dt) => dt.with_timezone(&Utc).format("%d.%m.%Y %H:%M").to_string(),
        Err(_) => format_date(datetime_str),
    }
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    parse_date(date_str)
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_part = date_str.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// True when `date_str` names a day before `today`. Unparseable dates never
/// count as past.
pub fn is_past(date_str: &str, today: NaiveDate) -> bool {
    parse_date(date_str).is_some_and(|d| d < today)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+00:00"), "31.12.2024 23:59");
        assert_eq!(format_datetime("2024-12-31"), "31.12.2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_is_past() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(is_past("2024-05-31T23:00:00Z", today));
        assert!(!is_past("2024-06-01", today));
        assert!(!is_past("soon", today));
    }
}
