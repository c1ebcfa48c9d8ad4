//! Parsing helpers for dates, instants and URLs.

use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use memento_core::MementoError;

fn invalid(message: String) -> anyhow::Error {
    MementoError::InvalidInput(message).into()
}

/// Parse a calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(format!("expected a YYYY-MM-DD date, got {}", value)))
}

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| invalid(format!("invalid date value: {}", value)))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(invalid(format!(
        "expected an ISO-8601 timestamp or YYYY-MM-DD date, got {}",
        value
    )))
}

/// Parse an absolute http(s) base URL for server-hosted images.
pub fn parse_origin(value: &str) -> anyhow::Result<Url> {
    let url = Url::parse(value.trim())
        .map_err(|e| invalid(format!("invalid origin URL {}: {}", value, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "origin must be an http or https URL, got {}",
            value
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_parse_datetime_accepts_both_forms() {
        assert_eq!(
            parse_datetime("2025-03-01T12:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("2025-03-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_parse_origin_requires_http() {
        assert!(parse_origin("https://diary.example.com").is_ok());
        assert!(parse_origin("ftp://diary.example.com").is_err());
        assert!(parse_origin("/relative").is_err());
    }
}
