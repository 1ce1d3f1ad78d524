//! Mapping a raw submission into the 13-column delivery record both
//! destinations share.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::dates;
use crate::submission::Submission;

/// Trip-type token for a one-way delivery.
pub const ONE_WAY_TOKEN: &str = "הלוך";
/// Trip-type token for a round trip.
pub const ROUND_TRIP_TOKEN: &str = "הלוך-חזור";

/// Quantity from the free-text trip type. Exact match only; anything else,
/// the empty string included, maps to blank rather than an error.
pub fn map_quantity(token: &str) -> Option<u8> {
    match token {
        ONE_WAY_TOKEN => Some(1),
        ROUND_TRIP_TOKEN => Some(2),
        _ => None,
    }
}

/// The treatment description: "from X to Y". Missing locations leave their
/// segment blank rather than failing.
pub fn describe_route(from: &str, to: &str) -> String {
    format!("מ{from} ל{to}")
}

/// A fully mapped delivery record in client-ledger column order. The
/// blank-by-contract columns (line number, price, sum) are not carried
/// here; the row projections emit them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DeliveryRecord {
    pub driver_email: String,
    /// Formatted `YYYY-MM-DD HH:mm:ss`, empty when the source had none.
    pub timestamp: String,
    pub delivery_mode: String,
    pub commitment_number: String,
    pub identification_number: String,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    /// Formatted `DD/MM/YYYY`, empty when no date could be reconciled.
    pub delivery_date: String,
    pub quantity: Option<u8>,
}

impl DeliveryRecord {
    /// Map a submission into its client name and delivery record.
    ///
    /// Data-quality problems (missing mandatory fields, unparseable dates,
    /// an unrecognized trip type) are logged and substituted with blanks;
    /// none of them stop the record from being built.
    pub fn from_submission(submission: &Submission) -> (String, Self) {
        let client_name = submission.client_name();

        let timestamp = dates::datetime_from_cell(submission.timestamp_raw())
            .map(dates::format_timestamp)
            .unwrap_or_default();

        let delivery_date = match dates::reconcile_delivery_date(
            submission.delivery_date_raw(),
            submission.timestamp_raw(),
        ) {
            Some(dt) => dates::format_date(dt),
            None => {
                debug!(
                    "no usable delivery date on intake row {}",
                    submission.source_row()
                );
                String::new()
            }
        };

        let quantity_token = submission.quantity_token();
        let quantity = map_quantity(&quantity_token);
        if quantity.is_none() && !quantity_token.is_empty() {
            warn!("unrecognized trip type {quantity_token:?}, quantity left blank");
        }

        let record = Self {
            driver_email: submission.driver_email(),
            timestamp,
            delivery_mode: submission.delivery_mode(),
            commitment_number: submission.commitment_number(),
            identification_number: submission.identification_number(),
            first_name: submission.first_name(),
            last_name: submission.last_name(),
            description: describe_route(
                &submission.from_location(),
                &submission.to_location(),
            ),
            delivery_date,
            quantity,
        };

        if client_name.is_empty()
            || record.first_name.is_empty()
            || record.last_name.is_empty()
            || record.description.is_empty()
        {
            warn!(
                "mandatory fields missing on intake row {}; record will be added with incomplete data",
                submission.source_row()
            );
        }

        (client_name, record)
    }

    fn quantity_cell(&self) -> CellValue {
        match self.quantity {
            Some(q) => CellValue::Number(f64::from(q)),
            None => CellValue::Empty,
        }
    }

    /// The 13-column row written to the client ledger, in schema order.
    pub fn partition_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::text(self.driver_email.clone()),
            CellValue::text(self.timestamp.clone()),
            CellValue::text(self.delivery_mode.clone()),
            CellValue::Empty, // line number, blank by contract
            CellValue::text(self.commitment_number.clone()),
            CellValue::text(self.identification_number.clone()),
            CellValue::text(self.first_name.clone()),
            CellValue::text(self.last_name.clone()),
            CellValue::text(self.description.clone()),
            CellValue::text(self.delivery_date.clone()),
            self.quantity_cell(),
            CellValue::Empty, // price, blank by contract
            CellValue::Empty, // sum, blank by contract
        ]
    }

    /// The 14-column row written to the summary sheet: client name first,
    /// then the ledger columns unchanged.
    pub fn summary_row(&self, client_name: &str) -> Vec<CellValue> {
        let mut row = Vec::with_capacity(self.partition_row().len() + 1);
        row.push(CellValue::text(client_name));
        row.extend(self.partition_row());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::submission::FIELD_COUNT;

    fn datetime_cell(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> CellValue {
        CellValue::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    fn full_submission() -> Submission {
        Submission::new(
            "הזנות",
            2,
            vec![
                datetime_cell(2025, 6, 8, 10, 0, 0),
                CellValue::text("driver@x.com"),
                CellValue::text("ClientA"),
                CellValue::text("Drive"),
                CellValue::text("C100"),
                CellValue::text("ID1"),
                CellValue::text("Dana"),
                CellValue::text("Cohen"),
                CellValue::text("Tel Aviv"),
                CellValue::text("Haifa"),
                datetime_cell(2025, 6, 9, 0, 0, 0),
                CellValue::text("הלוך-חזור"),
            ],
        )
    }

    #[test]
    /// The quantity mapping is a pure exact-match function.
    fn quantity_mapping_recognizes_exactly_two_tokens() {
        assert_eq!(Some(1), map_quantity("הלוך"));
        assert_eq!(Some(2), map_quantity("הלוך-חזור"));
        assert_eq!(None, map_quantity(""));
        assert_eq!(None, map_quantity("round trip"));
        assert_eq!(None, map_quantity("2"));
        assert_eq!(None, map_quantity("הלוך "));
    }

    #[test]
    fn description_combines_both_locations() {
        assert_eq!("מTel Aviv לHaifa", describe_route("Tel Aviv", "Haifa"));
        // missing inputs propagate as blank segments, not errors
        assert_eq!("מ ל", describe_route("", ""));
    }

    #[test]
    fn full_submission_maps_to_the_expected_ledger_row() {
        let (client, record) = DeliveryRecord::from_submission(&full_submission());
        assert_eq!("ClientA", client);
        assert_eq!(
            vec![
                CellValue::Text("driver@x.com".to_string()),
                CellValue::Text("2025-06-08 10:00:00".to_string()),
                CellValue::Text("Drive".to_string()),
                CellValue::Empty,
                CellValue::Text("C100".to_string()),
                CellValue::Text("ID1".to_string()),
                CellValue::Text("Dana".to_string()),
                CellValue::Text("Cohen".to_string()),
                CellValue::Text("מTel Aviv לHaifa".to_string()),
                CellValue::Text("09/06/2025".to_string()),
                CellValue::Number(2.0),
                CellValue::Empty,
                CellValue::Empty,
            ],
            record.partition_row()
        );
    }

    #[test]
    /// Ledger row and summary row agree on all shared fields; the summary
    /// row only adds the client name in front.
    fn summary_row_is_the_ledger_row_prefixed_with_the_client() {
        let (client, record) = DeliveryRecord::from_submission(&full_submission());
        let summary = record.summary_row(&client);
        assert_eq!(CellValue::Text("ClientA".to_string()), summary[0]);
        assert_eq!(record.partition_row(), summary[1..].to_vec());
    }

    #[test]
    fn missing_form_date_uses_the_timestamp_day() {
        let mut values = vec![CellValue::Empty; FIELD_COUNT];
        values[0] = datetime_cell(2025, 6, 8, 23, 59, 0);
        let (_, record) = DeliveryRecord::from_submission(&Submission::new("הזנות", 3, values));
        assert_eq!("08/06/2025", record.delivery_date);
        assert_eq!("2025-06-08 23:59:00", record.timestamp);
    }

    #[test]
    fn text_dates_are_parsed_like_values() {
        let mut values = vec![CellValue::Empty; FIELD_COUNT];
        values[0] = CellValue::text("2025-06-08 10:00:00");
        values[10] = CellValue::text("09/06/2025");
        let (_, record) = DeliveryRecord::from_submission(&Submission::new("הזנות", 4, values));
        assert_eq!("2025-06-08 10:00:00", record.timestamp);
        assert_eq!("09/06/2025", record.delivery_date);
    }

    #[test]
    fn blank_everything_still_builds_a_record() {
        let values = vec![CellValue::Empty; FIELD_COUNT];
        let (client, record) = DeliveryRecord::from_submission(&Submission::new("הזנות", 5, values));
        assert_eq!("", client);
        assert_eq!("", record.timestamp);
        assert_eq!("", record.delivery_date);
        assert_eq!(None, record.quantity);
        assert_eq!("מ ל", record.description);
    }
}
