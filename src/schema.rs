//! The shared field schema: one ordered column list drives both the client
//! ledger layout and the client-name-prefixed summary layout. Column
//! positions are always derived from this list by name.

/// Header written in front of the ledger columns on the summary sheet.
pub const CLIENT_NAME_HEADER: &str = "שם לקוח";

pub const DRIVER_HEADER: &str = "נהג";
pub const TIMESTAMP_HEADER: &str = "חותמת זמן";
pub const DELIVERY_MODE_HEADER: &str = "דרייב / פיזי";
pub const LINE_NUMBER_HEADER: &str = "מספר שורה";
pub const COMMITMENT_HEADER: &str = "מספר התחייבות";
pub const IDENTIFICATION_HEADER: &str = "מספר זיהוי";
pub const FIRST_NAME_HEADER: &str = "שם פרטי";
pub const LAST_NAME_HEADER: &str = "שם משפחה";
pub const DESCRIPTION_HEADER: &str = "תאור הטיפול";
pub const DATE_HEADER: &str = "תאריך";
pub const QUANTITY_HEADER: &str = "כמות";
pub const PRICE_HEADER: &str = "מחיר";
pub const SUM_HEADER: &str = "סכום";

/// Column order of every client ledger sheet. This is the single source of
/// truth for row layout; the summary layout is derived from it.
pub const CLIENT_SHEET_HEADERS: [&str; 13] = [
    DRIVER_HEADER,
    TIMESTAMP_HEADER,
    DELIVERY_MODE_HEADER,
    LINE_NUMBER_HEADER,
    COMMITMENT_HEADER,
    IDENTIFICATION_HEADER,
    FIRST_NAME_HEADER,
    LAST_NAME_HEADER,
    DESCRIPTION_HEADER,
    DATE_HEADER,
    QUANTITY_HEADER,
    PRICE_HEADER,
    SUM_HEADER,
];

/// Number of columns in a client ledger row.
pub fn column_count() -> usize {
    CLIENT_SHEET_HEADERS.len()
}

/// Number of columns in a summary row (client name + ledger columns).
pub fn summary_column_count() -> usize {
    CLIENT_SHEET_HEADERS.len() + 1
}

/// 0-based position of a named column in the client ledger layout.
pub fn column_index(name: &str) -> Option<usize> {
    CLIENT_SHEET_HEADERS.iter().position(|&h| h == name)
}

/// 0-based position of the delivery-date column in the client ledger layout.
pub fn date_column_index() -> usize {
    column_index(DATE_HEADER).expect("schema contains the date column")
}

/// 1-based column of a named ledger field in the summary layout, where the
/// client-name column occupies column 1.
pub fn summary_column(name: &str) -> Option<usize> {
    if name == CLIENT_NAME_HEADER {
        Some(1)
    } else {
        column_index(name).map(|i| i + 2)
    }
}

/// Summary header row: client name first, then the ledger columns.
pub fn summary_headers() -> Vec<&'static str> {
    let mut headers = Vec::with_capacity(summary_column_count());
    headers.push(CLIENT_NAME_HEADER);
    headers.extend_from_slice(&CLIENT_SHEET_HEADERS);
    headers
}
