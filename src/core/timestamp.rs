//! Timestamp formatting for rendered records
//!
//! Records carry local time with millisecond precision, e.g.
//! `2025-01-08 10:30:45.123`. Sub-millisecond digits are truncated, not
//! rounded.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt::Display;

/// strftime pattern used for every record.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// strftime pattern used for the date embedded in daily file names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local time.
#[inline]
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Render a timestamp the way it appears at the start of a record.
#[must_use]
pub fn format_record_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render the date used in daily rotating file names.
#[must_use]
pub fn format_file_date(date: NaiveDate) -> String {
    date.format(FILE_DATE_FORMAT).to_string()
}
