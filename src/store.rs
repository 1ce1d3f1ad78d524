//! The tabular store the engine runs against.
//!
//! The host is a name-indexed, position-indexed grid with no schema
//! enforcement. `SheetStore` captures the handful of capabilities the
//! ingest and report paths actually need, so the logic can run against the
//! in-memory grid in tests and against the CSV workbook adapter in the
//! binary. Rows and columns are 1-based throughout, matching how the host
//! addresses cells.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::cell::CellValue;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The named sheet does not exist in the store.
    #[error("sheet \"{0}\" not found")]
    SheetNotFound(String),
    /// The backing storage could not be read or written.
    #[error("workbook I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A sheet's backing file is not readable or writable as CSV.
    #[error("workbook CSV failure: {0}")]
    Csv(#[from] csv::Error),
}

pub trait SheetStore {
    /// Sheet names in the store's native enumeration order.
    fn sheet_names(&self) -> Vec<String>;

    fn has_sheet(&self, name: &str) -> bool;

    /// 1-based index of the last row holding any content, 0 when the sheet
    /// is entirely empty.
    fn last_row(&self, sheet: &str) -> Result<usize, StoreError>;

    /// Number of allocated grid rows, content or not.
    fn max_rows(&self, sheet: &str) -> Result<usize, StoreError>;

    fn read_cell(&self, sheet: &str, row: usize, col: usize) -> Result<CellValue, StoreError>;

    /// Read a `rows` x `cols` block starting at `(start_row, 1)`. Cells
    /// beyond the allocated grid come back empty.
    fn read_rows(
        &self,
        sheet: &str,
        start_row: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Vec<CellValue>>, StoreError>;

    /// Write one row starting at column 1, extending the grid as needed.
    fn write_row(&mut self, sheet: &str, row: usize, values: &[CellValue])
    -> Result<(), StoreError>;

    /// Write a block of rows starting at `start_row`.
    fn write_rows(
        &mut self,
        sheet: &str,
        start_row: usize,
        rows: &[Vec<CellValue>],
    ) -> Result<(), StoreError> {
        for (offset, row) in rows.iter().enumerate() {
            self.write_row(sheet, start_row + offset, row)?;
        }
        Ok(())
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), StoreError>;

    /// Blank out a `rows` x `cols` block starting at `(start_row, 1)`.
    /// Allocation is untouched, only content goes.
    fn clear_range(
        &mut self,
        sheet: &str,
        start_row: usize,
        rows: usize,
        cols: usize,
    ) -> Result<(), StoreError>;

    /// Apply a number-format code to `rows` cells down one column.
    fn set_number_format(
        &mut self,
        sheet: &str,
        start_row: usize,
        col: usize,
        rows: usize,
        format: &str,
    ) -> Result<(), StoreError>;

    /// Bold + centered styling across a header row span.
    fn set_header_format(&mut self, sheet: &str, row: usize, cols: usize)
    -> Result<(), StoreError>;

    /// Resize `cols` columns to fit their content.
    fn autofit_columns(&mut self, sheet: &str, cols: usize) -> Result<(), StoreError>;
}

/// One named sheet: a growable grid plus the formatting directives applied
/// to it. Formatting is tracked rather than rendered, which is all the
/// tests and the CSV adapter need.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
    number_formats: BTreeMap<(usize, usize), String>,
    header_format_rows: Vec<usize>,
    autofitted_columns: usize,
}

impl Sheet {
    fn cell(&self, row: usize, col: usize) -> CellValue {
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    fn ensure_row(&mut self, row: usize) -> &mut Vec<CellValue> {
        if self.rows.len() < row {
            self.rows.resize(row, Vec::new());
        }
        &mut self.rows[row - 1]
    }

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        let cells = self.ensure_row(row);
        if cells.len() < col {
            cells.resize(col, CellValue::Empty);
        }
        cells[col - 1] = value;
    }

    pub fn row_values(&self, row: usize) -> Vec<CellValue> {
        self.rows.get(row - 1).cloned().unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The number-format code applied to a cell, if any.
    #[cfg(test)]
    pub fn number_format(&self, row: usize, col: usize) -> Option<&str> {
        self.number_formats.get(&(row, col)).map(String::as_str)
    }

    /// Whether a row has received header styling.
    #[cfg(test)]
    pub fn header_formatted(&self, row: usize) -> bool {
        self.header_format_rows.contains(&row)
    }

    /// How many columns the last auto-fit covered, 0 if never fitted.
    #[cfg(test)]
    pub fn autofitted_columns(&self) -> usize {
        self.autofitted_columns
    }
}

/// Name-indexed collection of sheets held entirely in memory. Enumeration
/// order is insertion order, standing in for the host's tab order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: Vec<(String, Sheet)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty sheet. Sheets are created out-of-band by whoever
    /// administers the workbook; the engine itself never creates one.
    pub fn add_sheet(&mut self, name: &str) {
        if !self.has_sheet(name) {
            self.sheets.push((name.to_string(), Sheet::default()));
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, StoreError> {
        self.sheets
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }

    fn sheet_ref(&self, name: &str) -> Result<&Sheet, StoreError> {
        self.sheet(name)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }
}

impl SheetStore for MemoryStore {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|(n, _)| n == name)
    }

    fn last_row(&self, sheet: &str) -> Result<usize, StoreError> {
        let sheet = self.sheet_ref(sheet)?;
        let last = sheet
            .rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|i| i + 1)
            .unwrap_or(0);
        Ok(last)
    }

    fn max_rows(&self, sheet: &str) -> Result<usize, StoreError> {
        Ok(self.sheet_ref(sheet)?.rows.len())
    }

    fn read_cell(&self, sheet: &str, row: usize, col: usize) -> Result<CellValue, StoreError> {
        Ok(self.sheet_ref(sheet)?.cell(row, col))
    }

    fn read_rows(
        &self,
        sheet: &str,
        start_row: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Vec<CellValue>>, StoreError> {
        let sheet = self.sheet_ref(sheet)?;
        let block = (0..rows)
            .map(|r| (1..=cols).map(|c| sheet.cell(start_row + r, c)).collect())
            .collect();
        Ok(block)
    }

    fn write_row(
        &mut self,
        sheet: &str,
        row: usize,
        values: &[CellValue],
    ) -> Result<(), StoreError> {
        let sheet = self.sheet_mut(sheet)?;
        for (i, value) in values.iter().enumerate() {
            sheet.set_cell(row, i + 1, value.clone());
        }
        Ok(())
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), StoreError> {
        self.sheet_mut(sheet)?.set_cell(row, col, value);
        Ok(())
    }

    fn clear_range(
        &mut self,
        sheet: &str,
        start_row: usize,
        rows: usize,
        cols: usize,
    ) -> Result<(), StoreError> {
        let sheet = self.sheet_mut(sheet)?;
        // only existing cells are blanked, allocation stays put
        for row in start_row..start_row + rows {
            if row > sheet.rows.len() {
                break;
            }
            for col in 1..=cols {
                let cells = &mut sheet.rows[row - 1];
                if col <= cells.len() {
                    cells[col - 1] = CellValue::Empty;
                }
            }
        }
        Ok(())
    }

    fn set_number_format(
        &mut self,
        sheet: &str,
        start_row: usize,
        col: usize,
        rows: usize,
        format: &str,
    ) -> Result<(), StoreError> {
        let sheet = self.sheet_mut(sheet)?;
        for row in start_row..start_row + rows {
            sheet.number_formats.insert((row, col), format.to_string());
        }
        Ok(())
    }

    fn set_header_format(
        &mut self,
        sheet: &str,
        row: usize,
        _cols: usize,
    ) -> Result<(), StoreError> {
        let sheet = self.sheet_mut(sheet)?;
        if !sheet.header_format_rows.contains(&row) {
            sheet.header_format_rows.push(row);
        }
        Ok(())
    }

    fn autofit_columns(&mut self, sheet: &str, cols: usize) -> Result<(), StoreError> {
        self.sheet_mut(sheet)?.autofitted_columns = cols;
        Ok(())
    }
}
