mod cell;
mod config;
mod dates;
mod ingest;
mod intake;
mod record;
mod report;
mod schema;
mod store;
mod submission;
mod workbook;

use std::path::Path;

use config::Config;
use ingest::IngestOutcome;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let workbook_dir = args
        .next()
        .expect("Expected workbook directory as argument");
    let command = args
        .next()
        .expect("Expected a command: ingest <responses-file> | report");

    let config = Config::default();
    let result = match command.as_str() {
        "ingest" => {
            let responses = args.next().expect("Expected responses file as argument");
            run_ingest(Path::new(&workbook_dir), Path::new(&responses), &config)
        }
        "report" => run_report(Path::new(&workbook_dir), &config),
        other => {
            eprintln!("Unknown command \"{other}\", expected \"ingest\" or \"report\"");
            std::process::exit(2);
        }
    };

    // the CLI stand-in for the host's error dialog
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Route every intake row into its client ledger and the summary sheet.
fn run_ingest(
    dir: &Path,
    responses: &Path,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = workbook::load(dir)?;
    let mut reader = intake::create_intake_reader(responses)?;
    let submissions = intake::submissions_from_reader(&mut reader, &config.intake_sheet)?;

    let mut appended = 0usize;
    for submission in &submissions {
        match ingest::handle_submission(&mut store, config, submission) {
            Ok(IngestOutcome::Appended { .. }) => appended += 1,
            Ok(IngestOutcome::IgnoredSource) => {}
            // ingest has no user to talk to; faults are logged and the
            // remaining rows still go through
            Err(e) => log::error!("intake row {} not routed: {e}", submission.source_row()),
        }
    }
    workbook::save(dir, &store)?;

    println!("{appended} of {} intake rows routed.", submissions.len());
    Ok(())
}

/// Rebuild the daily summary for the date entered in the input cell.
fn run_report(dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = workbook::load(dir)?;
    let outcome = report::generate_daily_report(&mut store, config)?;
    workbook::save(dir, &store)?;
    println!("{}", outcome.message());
    Ok(())
}
