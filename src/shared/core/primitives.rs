use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid date format: {0}")]
    InvalidFormat(String),
}

/// A calendar day with no time component.
///
/// Record identity depends on date equality, so every date that reaches the
/// backing store goes through this type first. Its textual form is always
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Drops the time of day. The calendar day is taken in the timestamp's own
    /// offset, so two instants on the same local day always normalize equally.
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }

    pub fn today() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive `YYYY-MM-DDTHH:MM:SS`.
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, CANONICAL_DATE_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(&at));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(naive.date()));
        }
        Err(DateParseError::InvalidDate(input.to_string()))
    }

    /// Renders the day for people. Fails for patterns a bare date cannot
    /// fill, such as `%H` or `%z`.
    pub fn display_with(&self, format: &str) -> Result<String, DateParseError> {
        let items = StrftimeItems::new(format);
        if items.clone().any(|item| matches!(item, Item::Error)) {
            return Err(DateParseError::InvalidFormat(format.to_string()));
        }
        let mut shown = String::new();
        write!(shown, "{}", self.0.format_with_items(items))
            .map_err(|_| DateParseError::InvalidFormat(format.to_string()))?;
        Ok(shown)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_DATE_FORMAT))
    }
}

impl FromStr for CanonicalDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CanonicalDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalDate> for String {
    fn from(value: CanonicalDate) -> Self {
        value.to_string()
    }
}

/// Rejects strftime patterns that cannot render a calendar day.
pub fn validate_date_format(format: &str) -> Result<(), DateParseError> {
    if format.is_empty() {
        return Err(DateParseError::InvalidFormat(format.to_string()));
    }
    let sample = CanonicalDate(NaiveDate::MIN);
    sample.display_with(format).map(|_| ())
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod canonical_date_tests {
    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;

    #[rstest]
    #[case("2026-10-14T00:00:00Z")]
    #[case("2026-10-14T08:30:00Z")]
    #[case("2026-10-14T23:59:59.999Z")]
    #[case("2026-10-14")]
    #[case("2026-10-14T12:00:00")]
    fn it_should_normalize_any_time_of_day_to_the_same_day(#[case] input: &str) {
        let date = CanonicalDate::parse(input).expect("parse failed");
        assert_eq!(date.to_string(), "2026-10-14");
    }

    #[rstest]
    fn it_should_keep_the_local_calendar_day_of_an_offset_timestamp() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let late_evening = offset.with_ymd_and_hms(2026, 10, 14, 23, 30, 0).unwrap();
        let early_morning = offset.with_ymd_and_hms(2026, 10, 14, 0, 15, 0).unwrap();
        assert_eq!(
            CanonicalDate::from_datetime(&late_evening),
            CanonicalDate::from_datetime(&early_morning)
        );
        assert_eq!(CanonicalDate::from_datetime(&early_morning).to_string(), "2026-10-14");
    }

    #[rstest]
    #[case("")]
    #[case("14/10/2026")]
    #[case("2026-13-01")]
    fn it_should_reject_text_that_is_not_a_date(#[case] input: &str) {
        assert_eq!(
            CanonicalDate::parse(input),
            Err(DateParseError::InvalidDate(input.to_string()))
        );
    }

    #[rstest]
    fn it_should_serialize_as_the_canonical_string() {
        let date = CanonicalDate::parse("2026-01-05").unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), serde_json::json!("2026-01-05"));
        let back: CanonicalDate = serde_json::from_str("\"2026-01-05T10:00:00Z\"").unwrap();
        assert_eq!(back, date);
    }

    #[rstest]
    fn it_should_render_the_display_form() {
        let date = CanonicalDate::parse("2026-01-05").unwrap();
        assert_eq!(date.display_with("%-m/%-d/%Y").unwrap(), "1/5/2026");
    }

    #[rstest]
    #[case("%H:%M")]
    #[case("%z")]
    fn it_should_refuse_to_render_time_fields_for_a_day(#[case] format: &str) {
        let date = CanonicalDate::parse("2026-10-14").unwrap();
        assert_eq!(
            date.display_with(format),
            Err(DateParseError::InvalidFormat(format.to_string()))
        );
    }

    #[rstest]
    #[case("%-m/%-d/%Y", true)]
    #[case("%d.%m.%Y", true)]
    #[case("%Q", false)]
    #[case("%H:%M", false)]
    #[case("%z", false)]
    #[case("", false)]
    fn it_should_validate_display_formats(#[case] format: &str, #[case] valid: bool) {
        assert_eq!(validate_date_format(format).is_ok(), valid);
    }
}
