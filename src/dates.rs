//! Date reconciliation for submissions and reports.
//!
//! Cells may carry a real date-time value or free text someone typed or a
//! previous run formatted. Both are accepted: values pass through, text is
//! parsed against the handful of shapes this system itself emits plus the
//! common ISO ones. Anything else counts as absent, never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use crate::cell::CellValue;

/// Output shape of a submission timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Output shape of a delivery date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Number-format code applied to timestamp columns on the summary sheet.
pub const TIMESTAMP_NUMBER_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";
/// Number-format code applied to date columns on the summary sheet.
pub const DATE_NUMBER_FORMAT: &str = "dd/MM/yyyy";

const DATETIME_TEXT_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_TEXT_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Parse a date-time out of free text. Date-only text lands at midnight.
pub fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATETIME_TEXT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for format in DATE_TEXT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// A date-time from a cell: real values pass through, text is parsed,
/// everything else is absent.
pub fn datetime_from_cell(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Text(text) => {
            let parsed = parse_datetime_text(text);
            if parsed.is_none() && !text.trim().is_empty() {
                debug!("value {text:?} is not a recognizable date");
            }
            parsed
        }
        _ => None,
    }
}

/// The delivery date of a record: the explicit date cell when it carries a
/// usable value, otherwise the calendar day of the submission timestamp.
pub fn reconcile_delivery_date(
    date_cell: &CellValue,
    timestamp_cell: &CellValue,
) -> Option<NaiveDateTime> {
    datetime_from_cell(date_cell).or_else(|| datetime_from_cell(timestamp_cell))
}

pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(dt: NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Calendar-day equality: time-of-day is ignored.
pub fn same_calendar_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}
