//! Form-intake adapter: translates raw intake rows into submission events,
//! so the ingest path never sees the host's own event shape.

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use crate::cell::CellValue;
use crate::submission::Submission;

/// Open a reader over an intake export. Surrounding whitespace is
/// insignificant and short rows are tolerated.
pub fn create_intake_reader(path: &Path) -> Result<csv::Reader<File>, csv::Error> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
}

/// Every data row of the intake export as a submission event. The header
/// row is skipped; sheet rows are numbered from 1, so the first data row
/// reports as row 2.
pub fn submissions_from_reader<R: io::Read>(
    reader: &mut csv::Reader<R>,
    intake_sheet: &str,
) -> Result<Vec<Submission>, csv::Error> {
    let mut submissions = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let values: Vec<CellValue> = record.iter().map(CellValue::text).collect();
        submissions.push(Submission::new(intake_sheet, i + 2, values));
    }
    debug!("{} intake rows read", submissions.len());
    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_over(bytes: &[u8]) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .delimiter(b',')
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(bytes)
    }

    #[test]
    fn header_row_is_skipped_and_rows_are_numbered_from_two() {
        let data = "\
ts,email,client,mode,commit,id,first,last,from,to,date,qty
2025-06-08 10:00:00,driver@x.com,ClientA,Drive,C100,ID1,Dana,Cohen,Tel Aviv,Haifa,09/06/2025,הלוך
2025-06-08 11:00:00,other@x.com,ClientB,Physical,,,,,,,,
";
        let subs = submissions_from_reader(&mut reader_over(data.as_bytes()), "הזנות").unwrap();
        assert_eq!(2, subs.len());
        assert_eq!(2, subs[0].source_row());
        assert_eq!("הזנות", subs[0].source_sheet());
        assert_eq!("ClientA", subs[0].client_name());
        assert_eq!("הלוך", subs[0].quantity_token());
        assert_eq!("ClientB", subs[1].client_name());
        assert_eq!("", subs[1].quantity_token());
    }

    #[test]
    fn short_rows_still_become_submissions() {
        let data = b"h1,h2\n2025-06-08 10:00:00,driver@x.com\n";
        let subs = submissions_from_reader(&mut reader_over(data), "הזנות").unwrap();
        assert_eq!(1, subs.len());
        assert_eq!("driver@x.com", subs[0].driver_email());
        assert_eq!("", subs[0].client_name());
    }

    #[test]
    fn fields_arrive_trimmed() {
        let data = b"h\n x , driver@x.com , ClientA \n";
        let subs = submissions_from_reader(&mut reader_over(data), "הזנות").unwrap();
        assert_eq!("ClientA", subs[0].client_name());
    }
}
