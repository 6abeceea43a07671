//! Report command handler: display runs from the statistics store.

use super::{check_precision, load_config};
use crate::error::CliError;
use crate::formatters::format_report;
use crate::store::StatsStore;
use crate::ui;
use std::io::Write;

/// Handle the report command.
///
/// Shows the latest stored run, the run with id `run`, or every run with
/// `all`. An empty store is reported as a warning, not an error; asking for
/// an id that is not stored is an error.
pub fn handle_report_command(
    store: Option<String>,
    run: Option<u64>,
    all: bool,
    precision: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config()?;
    let precision = check_precision(precision.unwrap_or(cfg.precision))?;
    let store = StatsStore::new(store.unwrap_or(cfg.store));

    let records = if all {
        store.load()?
    } else if let Some(id) = run {
        let record = store.find(id)?.ok_or_else(|| {
            CliError::InvalidInput(format!(
                "no run with id {} in {}",
                id,
                store.path().display()
            ))
        })?;
        vec![record]
    } else {
        store.latest()?.into_iter().collect()
    };

    if records.is_empty() {
        ui::display_warning(
            err,
            &format!("no runs stored in {}", store.path().display()),
        )?;
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", format_report(record, precision, true))?;
    }
    Ok(())
}
