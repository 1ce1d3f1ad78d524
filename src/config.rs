/// Immutable runtime configuration. Built once at startup and passed by
/// reference into the ingest and report paths; nothing mutates it afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the summary sheet the report rebuilds and ingest appends to.
    pub summary_sheet: String,
    /// Name of the raw form-intake sheet. Submissions from any other sheet
    /// are ignored, and the sheet itself is never scanned for deliveries.
    pub intake_sheet: String,
    /// 1-based (row, column) of the cell holding the report's target date,
    /// read from the summary sheet.
    pub date_input_cell: (usize, usize),
    /// 1-based row the summary header is written to.
    pub summary_header_row: usize,
    /// 1-based first data row on the summary sheet.
    pub summary_start_row: usize,
    /// Number of header rows on every client ledger sheet.
    pub client_header_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_sheet: "סיכום יומי".to_string(),
            intake_sheet: "הזנות".to_string(),
            date_input_cell: (2, 2),
            summary_header_row: 5,
            summary_start_row: 6,
            client_header_rows: 1,
        }
    }
}
