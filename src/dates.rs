//! Calendar helpers shared by the schedule generator and the persisted
//! document format.

use chrono::{DateTime, Months, NaiveDate};

const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// Adds whole calendar months, clamping the day to the end of the target
/// month (Jan 31 + 1 month = Feb 28 or Feb 29).
///
/// Returns `None` when the result falls outside chrono's supported range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Parses either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, in
/// which case the UTC calendar date is kept.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = input.trim();
    match NaiveDate::parse_from_str(trimmed, CALENDAR_FORMAT) {
        Ok(date) => Ok(date),
        Err(date_err) => DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| timestamp.naive_utc().date())
            .map_err(|_| date_err),
    }
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_FORMAT).to_string()
}

/// Serde adapter for `NaiveDate` fields: writes `YYYY-MM-DD`, reads anything
/// [`parse_calendar_date`] accepts.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(super::CALENDAR_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }
}
