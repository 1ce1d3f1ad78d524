use crate::cell::CellValue;

/// Number of positional fields a form submission carries.
pub const FIELD_COUNT: usize = 12;

// positions on the raw record, 0-indexed
const TIMESTAMP_IDX: usize = 0;
const DRIVER_EMAIL_IDX: usize = 1;
const CLIENT_NAME_IDX: usize = 2;
const DELIVERY_MODE_IDX: usize = 3;
const COMMITMENT_IDX: usize = 4;
const IDENTIFICATION_IDX: usize = 5;
const FIRST_NAME_IDX: usize = 6;
const LAST_NAME_IDX: usize = 7;
const FROM_LOCATION_IDX: usize = 8;
const TO_LOCATION_IDX: usize = 9;
const DELIVERY_DATE_IDX: usize = 10;
const QUANTITY_IDX: usize = 11;

/// One form-submission event: the positional raw values plus where the host
/// says they came from. The field order is a hard contract with the form;
/// every accessor below reads a fixed position.
#[derive(Clone, Debug)]
pub struct Submission {
    source_sheet: String,
    source_row: usize,
    values: Vec<CellValue>,
}

impl Submission {
    /// Wrap a raw event row. Short rows are padded with empty cells, so a
    /// form that omitted trailing answers still maps cleanly.
    pub fn new(source_sheet: impl Into<String>, source_row: usize, mut values: Vec<CellValue>) -> Self {
        if values.len() < FIELD_COUNT {
            values.resize(FIELD_COUNT, CellValue::Empty);
        }
        Self {
            source_sheet: source_sheet.into(),
            source_row,
            values,
        }
    }

    /// Name of the sheet the event was raised on.
    pub fn source_sheet(&self) -> &str {
        &self.source_sheet
    }

    /// 1-based row of the event on its source sheet.
    pub fn source_row(&self) -> usize {
        self.source_row
    }

    fn text_at(&self, idx: usize) -> String {
        self.values[idx].render().trim().to_string()
    }

    /// The raw submission timestamp, date-valued or text.
    pub fn timestamp_raw(&self) -> &CellValue {
        &self.values[TIMESTAMP_IDX]
    }

    /// The raw delivery date from the form, date-valued or text.
    pub fn delivery_date_raw(&self) -> &CellValue {
        &self.values[DELIVERY_DATE_IDX]
    }

    pub fn driver_email(&self) -> String {
        self.text_at(DRIVER_EMAIL_IDX)
    }

    /// The partition key: must name an existing client sheet.
    pub fn client_name(&self) -> String {
        self.text_at(CLIENT_NAME_IDX)
    }

    pub fn delivery_mode(&self) -> String {
        self.text_at(DELIVERY_MODE_IDX)
    }

    pub fn commitment_number(&self) -> String {
        self.text_at(COMMITMENT_IDX)
    }

    pub fn identification_number(&self) -> String {
        self.text_at(IDENTIFICATION_IDX)
    }

    pub fn first_name(&self) -> String {
        self.text_at(FIRST_NAME_IDX)
    }

    pub fn last_name(&self) -> String {
        self.text_at(LAST_NAME_IDX)
    }

    pub fn from_location(&self) -> String {
        self.text_at(FROM_LOCATION_IDX)
    }

    pub fn to_location(&self) -> String {
        self.text_at(TO_LOCATION_IDX)
    }

    pub fn quantity_token(&self) -> String {
        self.text_at(QUANTITY_IDX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let sub = Submission::new("הזנות", 2, vec![CellValue::text("2025-06-08 10:00:00")]);
        assert_eq!("", sub.client_name());
        assert_eq!("", sub.quantity_token());
        assert_eq!(&CellValue::Empty, sub.delivery_date_raw());
    }

    #[test]
    fn text_accessors_trim_surrounding_whitespace() {
        let mut values = vec![CellValue::Empty; FIELD_COUNT];
        values[CLIENT_NAME_IDX] = CellValue::text("  ClientA  ");
        values[QUANTITY_IDX] = CellValue::text(" הלוך ");
        let sub = Submission::new("הזנות", 2, values);
        assert_eq!("ClientA", sub.client_name());
        assert_eq!("הלוך", sub.quantity_token());
    }
}
