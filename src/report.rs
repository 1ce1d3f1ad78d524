//! Report: scan every client ledger for deliveries on a target day and
//! rebuild the summary sheet body from scratch.
//!
//! The rebuild fully replaces whatever the summary held, including rows
//! ingest appended since the last run. Regeneration is the authoritative
//! path; the summary is always recomputable from the ledgers.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error, info, warn};
use thiserror::Error;

use crate::cell::CellValue;
use crate::config::Config;
use crate::dates;
use crate::schema;
use crate::store::{SheetStore, StoreError};

#[derive(Debug, Error)]
pub enum ReportError {
    /// The summary sheet is missing; there is nothing to read the target
    /// date from or write the report to.
    #[error("sheet \"{0}\" not found; create it or check the configured summary sheet name")]
    MissingSummarySheet(String),
    /// The target-date cell is empty or does not hold a usable date.
    #[error("no valid date in cell {cell} of sheet \"{sheet}\"")]
    InvalidTargetDate { sheet: String, cell: String },
    /// A store operation failed. The summary may be left cleared but not
    /// rewritten; no rollback is attempted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a finished run reports back to the user.
#[derive(Debug, PartialEq, Eq)]
pub struct ReportOutcome {
    pub target_date: NaiveDate,
    pub matched: usize,
}

impl ReportOutcome {
    /// The user-facing result line, also used as the empty-body marker.
    pub fn message(&self) -> String {
        let date = self.target_date.format(dates::DATE_FORMAT);
        if self.matched == 0 {
            format!("No deliveries found for {date}.")
        } else {
            format!("{} deliveries found for {date}.", self.matched)
        }
    }
}

/// Rebuild the summary sheet for the date entered in the input cell.
pub fn generate_daily_report(
    store: &mut impl SheetStore,
    config: &Config,
) -> Result<ReportOutcome, ReportError> {
    if !store.has_sheet(&config.summary_sheet) {
        return Err(ReportError::MissingSummarySheet(
            config.summary_sheet.clone(),
        ));
    }

    let (row, col) = config.date_input_cell;
    let target_cell = store.read_cell(&config.summary_sheet, row, col)?;
    let Some(target) = dates::datetime_from_cell(&target_cell) else {
        return Err(ReportError::InvalidTargetDate {
            sheet: config.summary_sheet.clone(),
            cell: cell_a1(row, col),
        });
    };
    // time-of-day in the input cell is irrelevant
    let target_day = target.date();
    info!("generating delivery report for {target_day}");

    let mut compiled: Vec<Vec<CellValue>> = Vec::new();
    for name in store.sheet_names() {
        if name == config.summary_sheet || name == config.intake_sheet {
            debug!("skipping reserved sheet {name:?}");
            continue;
        }
        // one broken ledger must not take the rest of the scan down
        match scan_partition(store, config, &name, target) {
            Ok(mut rows) => compiled.append(&mut rows),
            Err(e) => error!("skipping client sheet {name:?}: {e}"),
        }
    }
    info!("{} deliveries match {target_day}", compiled.len());

    let summary = config.summary_sheet.as_str();
    let header_row = config.summary_header_row;
    let columns = schema::summary_column_count();

    // wipe the old body, header row included, down to the end of the grid
    let max_rows = store.max_rows(summary)?;
    if max_rows >= header_row {
        store.clear_range(summary, header_row, max_rows - header_row + 1, columns)?;
    }

    let headers: Vec<CellValue> = schema::summary_headers()
        .into_iter()
        .map(CellValue::text)
        .collect();
    store.write_row(summary, header_row, &headers)?;
    store.set_header_format(summary, header_row, columns)?;

    let outcome = ReportOutcome {
        target_date: target_day,
        matched: compiled.len(),
    };

    if compiled.is_empty() {
        store.write_cell(
            summary,
            config.summary_start_row,
            1,
            CellValue::text(outcome.message()),
        )?;
        return Ok(outcome);
    }

    store.write_rows(summary, config.summary_start_row, &compiled)?;

    if let Some(col) = schema::summary_column(schema::DATE_HEADER) {
        store.set_number_format(
            summary,
            config.summary_start_row,
            col,
            compiled.len(),
            dates::DATE_NUMBER_FORMAT,
        )?;
    }
    if let Some(col) = schema::summary_column(schema::TIMESTAMP_HEADER) {
        store.set_number_format(
            summary,
            config.summary_start_row,
            col,
            compiled.len(),
            dates::TIMESTAMP_NUMBER_FORMAT,
        )?;
    }
    store.autofit_columns(summary, columns)?;

    Ok(outcome)
}

/// Rows of one client sheet that fall on the target day, projected into
/// summary layout (client name first, ledger columns copied positionally).
fn scan_partition(
    store: &impl SheetStore,
    config: &Config,
    name: &str,
    target: NaiveDateTime,
) -> Result<Vec<Vec<CellValue>>, StoreError> {
    let last_row = store.last_row(name)?;
    if last_row <= config.client_header_rows {
        debug!("client sheet {name:?} has no data rows, skipping");
        return Ok(Vec::new());
    }

    let data_rows = last_row - config.client_header_rows;
    let block = store.read_rows(
        name,
        config.client_header_rows + 1,
        data_rows,
        schema::column_count(),
    )?;

    let date_index = schema::date_column_index();
    let mut matched = Vec::new();
    for row in &block {
        if row.iter().all(CellValue::is_empty) || row.len() <= date_index {
            continue;
        }
        let date_cell = &row[date_index];
        match dates::datetime_from_cell(date_cell) {
            Some(dt) if dates::same_calendar_day(dt, target) => {
                let mut out = Vec::with_capacity(schema::summary_column_count());
                out.push(CellValue::text(name));
                for i in 0..schema::column_count() {
                    out.push(row.get(i).cloned().unwrap_or(CellValue::Empty));
                }
                matched.push(out);
            }
            Some(_) => {}
            None => {
                if !date_cell.is_empty() {
                    warn!(
                        "skipping a row in {name:?}: date column holds a non-date value {:?}",
                        date_cell
                    );
                }
            }
        }
    }
    debug!(
        "client sheet {name:?}: {} of {} rows match",
        matched.len(),
        block.len()
    );
    Ok(matched)
}

/// A1 notation for a 1-based (row, column) pair, for messages only.
fn cell_a1(row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut col = col;
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    format!("{letters}{row}")
}
