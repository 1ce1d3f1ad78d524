//! Ingest: route one form submission into its client ledger and the
//! summary sheet.

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::dates;
use crate::record::DeliveryRecord;
use crate::schema;
use crate::store::{SheetStore, StoreError};
use crate::submission::Submission;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The client sheet named by the submission does not exist; nothing
    /// was written anywhere.
    #[error("client sheet \"{0}\" not found; record not added")]
    UnknownClient(String),
    /// A store operation failed mid-write. The two destination writes are
    /// not transactional, so the ledger may already hold the record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What became of one submission.
#[derive(Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Appended to the named client ledger (and the summary, when present).
    Appended { client: String },
    /// The event came from a sheet other than the intake sheet.
    IgnoredSource,
}

/// Map a submission and append it to both destinations.
///
/// The only hard rejection is a client name with no matching sheet.
/// Data-quality problems are logged during mapping and written as blanks.
pub fn handle_submission(
    store: &mut impl SheetStore,
    config: &Config,
    submission: &Submission,
) -> Result<IngestOutcome, IngestError> {
    if submission.source_sheet() != config.intake_sheet {
        debug!(
            "event from non-intake sheet {:?}, skipping",
            submission.source_sheet()
        );
        return Ok(IngestOutcome::IgnoredSource);
    }

    let (client_name, record) = DeliveryRecord::from_submission(submission);

    if !store.has_sheet(&client_name) {
        warn!("client sheet {client_name:?} not found, record not added");
        return Err(IngestError::UnknownClient(client_name));
    }

    // ledger append lands below the header block even on an empty sheet
    let last = store.last_row(&client_name)?;
    let ledger_row = (last + 1).max(config.client_header_rows + 1);
    store.write_row(&client_name, ledger_row, &record.partition_row())?;
    debug!("appended to client sheet {client_name:?} at row {ledger_row}");

    // the summary half of the write; losing it leaves the ledger row in place
    if store.has_sheet(&config.summary_sheet) {
        let last = store.last_row(&config.summary_sheet)?;
        let summary_row = (last + 1).max(config.summary_start_row);
        store.write_row(
            &config.summary_sheet,
            summary_row,
            &record.summary_row(&client_name),
        )?;

        if let Some(col) = schema::summary_column(schema::DATE_HEADER) {
            store.set_number_format(
                &config.summary_sheet,
                summary_row,
                col,
                1,
                dates::DATE_NUMBER_FORMAT,
            )?;
        }
        if let Some(col) = schema::summary_column(schema::TIMESTAMP_HEADER) {
            store.set_number_format(
                &config.summary_sheet,
                summary_row,
                col,
                1,
                dates::TIMESTAMP_NUMBER_FORMAT,
            )?;
        }
        info!(
            "delivery for {client_name:?} routed to ledger row {ledger_row} and summary row {summary_row}"
        );
    } else {
        error!(
            "summary sheet {:?} not found, cannot append data",
            config.summary_sheet
        );
    }

    Ok(IngestOutcome::Appended {
        client: client_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::store::MemoryStore;
    use crate::submission::FIELD_COUNT;
    use chrono::NaiveDate;

    fn submission(client: &str) -> Submission {
        let mut values = vec![CellValue::Empty; FIELD_COUNT];
        values[0] = CellValue::DateTime(
            NaiveDate::from_ymd_opt(2025, 6, 8)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        );
        values[1] = CellValue::text("driver@x.com");
        values[2] = CellValue::text(client);
        values[3] = CellValue::text("Drive");
        values[6] = CellValue::text("Dana");
        values[7] = CellValue::text("Cohen");
        values[8] = CellValue::text("Tel Aviv");
        values[9] = CellValue::text("Haifa");
        values[11] = CellValue::text("הלוך");
        Submission::new("הזנות", 2, values)
    }

    fn store_with_client(config: &Config, client: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.add_sheet(&config.intake_sheet);
        store.add_sheet(&config.summary_sheet);
        store.add_sheet(client);
        store
    }

    #[test]
    /// The first ingest into an empty ledger lands below the header row,
    /// and the first summary append lands at the configured start row.
    fn appends_are_clamped_below_the_headers() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");

        let outcome = handle_submission(&mut store, &config, &submission("ClientA")).unwrap();
        assert_eq!(
            IngestOutcome::Appended {
                client: "ClientA".to_string()
            },
            outcome
        );

        assert_eq!(2, store.last_row("ClientA").unwrap());
        assert_eq!(
            config.summary_start_row,
            store.last_row(&config.summary_sheet).unwrap()
        );
    }

    #[test]
    fn consecutive_ingests_stack_up() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");

        for _ in 0..3 {
            handle_submission(&mut store, &config, &submission("ClientA")).unwrap();
        }
        assert_eq!(4, store.last_row("ClientA").unwrap());
        assert_eq!(8, store.last_row(&config.summary_sheet).unwrap());
    }

    #[test]
    /// Ledger row and summary row agree on all 13 shared fields; the
    /// summary row leads with the client name.
    fn both_destinations_receive_the_same_record() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");
        handle_submission(&mut store, &config, &submission("ClientA")).unwrap();

        let ledger_row = store.sheet("ClientA").unwrap().row_values(2);
        let summary_row = store
            .sheet(&config.summary_sheet)
            .unwrap()
            .row_values(config.summary_start_row);

        assert_eq!(CellValue::Text("ClientA".to_string()), summary_row[0]);
        assert_eq!(ledger_row, summary_row[1..].to_vec());
    }

    #[test]
    fn unknown_client_writes_nothing_anywhere() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");

        let res = handle_submission(&mut store, &config, &submission("Nobody"));
        assert!(matches!(res, Err(IngestError::UnknownClient(name)) if name == "Nobody"));

        assert_eq!(0, store.last_row("ClientA").unwrap());
        assert_eq!(0, store.last_row(&config.summary_sheet).unwrap());
    }

    #[test]
    fn events_from_other_sheets_are_ignored() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");

        let mut values = vec![CellValue::Empty; FIELD_COUNT];
        values[2] = CellValue::text("ClientA");
        let foreign = Submission::new("גיליון אחר", 2, values);

        let outcome = handle_submission(&mut store, &config, &foreign).unwrap();
        assert_eq!(IngestOutcome::IgnoredSource, outcome);
        assert_eq!(0, store.last_row("ClientA").unwrap());
    }

    #[test]
    /// A missing summary sheet loses only that half of the write.
    fn missing_summary_sheet_still_updates_the_ledger() {
        let config = Config::default();
        let mut store = MemoryStore::new();
        store.add_sheet(&config.intake_sheet);
        store.add_sheet("ClientA");

        let outcome = handle_submission(&mut store, &config, &submission("ClientA")).unwrap();
        assert!(matches!(outcome, IngestOutcome::Appended { .. }));
        assert_eq!(2, store.last_row("ClientA").unwrap());
    }

    #[test]
    fn summary_date_and_timestamp_columns_are_formatted() {
        let config = Config::default();
        let mut store = store_with_client(&config, "ClientA");
        handle_submission(&mut store, &config, &submission("ClientA")).unwrap();

        let sheet = store.sheet(&config.summary_sheet).unwrap();
        let date_col = schema::summary_column(schema::DATE_HEADER).unwrap();
        let ts_col = schema::summary_column(schema::TIMESTAMP_HEADER).unwrap();
        assert_eq!(
            Some(dates::DATE_NUMBER_FORMAT),
            sheet.number_format(config.summary_start_row, date_col)
        );
        assert_eq!(
            Some(dates::TIMESTAMP_NUMBER_FORMAT),
            sheet.number_format(config.summary_start_row, ts_col)
        );
    }
}
