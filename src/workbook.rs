//! CSV workbook adapter: one `.csv` file per sheet in a directory, loaded
//! into a [`MemoryStore`] before an operation and written back after a
//! mutating one. File stems are the sheet names. Files are visited in name
//! order, which stands in for the host's tab order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::cell::CellValue;
use crate::store::{MemoryStore, SheetStore, StoreError};

/// Load every sheet file in `dir` into a fresh in-memory store.
pub fn load(dir: &Path) -> Result<MemoryStore, StoreError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, io::Error>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut store = MemoryStore::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("skipping sheet file with unreadable name: {}", path.display());
            continue;
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;
        let rows = sheet_rows_from_reader(&mut reader)?;
        debug!("loaded sheet \"{name}\" ({} rows)", rows.len());

        store.add_sheet(name);
        for (i, row) in rows.into_iter().enumerate() {
            store.write_row(name, i + 1, &row)?;
        }
    }
    Ok(store)
}

/// Rows of one sheet file. Everything loads as text; empty fields load as
/// empty cells. The date pipeline reads formatted date text back out.
pub fn sheet_rows_from_reader<R: io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<Vec<CellValue>>, csv::Error> {
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::text).collect());
    }
    Ok(rows)
}

/// Write every sheet of the store back to its file in `dir`.
pub fn save(dir: &Path, store: &MemoryStore) -> Result<(), StoreError> {
    for name in store.sheet_names() {
        let Some(sheet) = store.sheet(&name) else {
            continue;
        };
        // pad rows to a common width so blank rows survive the round trip
        let width = (1..=sheet.row_count())
            .map(|row| sheet.row_values(row).len())
            .max()
            .unwrap_or(0)
            .max(1);

        let path = dir.join(format!("{name}.csv"));
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        for row in 1..=sheet.row_count() {
            let mut fields: Vec<String> = sheet
                .row_values(row)
                .iter()
                .map(CellValue::render)
                .collect();
            fields.resize(width, String::new());
            writer.serialize(fields)?;
        }
        writer.flush().map_err(StoreError::Io)?;
    }
    Ok(())
}
