use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dates;

/// A single grid value as read from or written to a sheet.
///
/// The host store is untyped: a cell can hold nothing, free text, a number
/// or a real date-time value. Everything flowing between the ingest/report
/// logic and the store is expressed in these terms.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// A cell counts as empty when it holds nothing or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Build a text cell, collapsing the empty string to `Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    /// The cell rendered as the string the backing file stores.
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                // whole numbers print without a trailing ".0"
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::DateTime(dt) => dt.format(dates::TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_text_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Text("x".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn text_constructor_collapses_empty() {
        assert_eq!(CellValue::Empty, CellValue::text(""));
        assert_eq!(CellValue::Text("a".to_string()), CellValue::text("a"));
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!("2", CellValue::Number(2.0).render());
        assert_eq!("2.5", CellValue::Number(2.5).render());
    }

    #[test]
    fn datetimes_render_in_timestamp_format() {
        let dt = NaiveDate::from_ymd_opt(2025, 6, 8)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!("2025-06-08 10:00:00", CellValue::DateTime(dt).render());
    }
}
