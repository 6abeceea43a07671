//! Simulation command handler.
//!
//! Runs the sharded sampler, prints the run's report, and appends the run
//! to the statistics store. `--max-seconds` arms a watchdog thread that
//! cancels the run when the time is up; a cancelled run still prints its
//! partial report but is never stored.
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//! let args = ["pokerstat", "sim", "--trials", "100000", "--seed", "42", "--no-store"];
//! let code = pokerstat_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use super::{check_precision, load_config};
use crate::cli::SimArgs;
use crate::error::CliError;
use crate::formatters::format_report;
use crate::store::StatsStore;
use crate::ui;
use pokerstat_engine::cancel::CancellationToken;
use pokerstat_engine::sim::{SimConfig, run_with_cancel};
use pokerstat_engine::stats::StatisticsRecord;
use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info};

/// Handle the sim command.
///
/// Flags override the configuration file and environment. Returns
/// `CliError::Interrupted` when the watchdog cancelled the run.
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config()?;
    let trials = args.trials.unwrap_or(cfg.trials);
    if trials == 0 {
        return Err(CliError::InvalidInput("trials must be >= 1".to_string()));
    }
    let precision = check_precision(args.precision.unwrap_or(cfg.precision))?;
    let layout = args.layout.layout()?;

    let mut sim = SimConfig::new(trials)
        .with_layout(layout)
        .with_hand_size(args.hand_size)
        .with_workers(args.workers.unwrap_or(cfg.workers));
    if let Some(seed) = args.seed.or(cfg.seed) {
        sim = sim.with_seed(seed);
    }

    let token = CancellationToken::new();
    let watchdog = args
        .max_seconds
        .map(|secs| Watchdog::arm(secs, token.clone()))
        .transpose()?;
    let result = run_with_cancel(&sim, Some(&token));
    if let Some(watchdog) = watchdog {
        watchdog.disarm()?;
    }
    let record = result?;

    if record.is_cancelled() {
        write_record(out, &record, args.json, precision, layout.is_standard())?;
        ui::display_warning(
            err,
            &format!(
                "run cancelled after {} of {} trials; not stored",
                record.trial_count(),
                trials
            ),
        )?;
        return Err(CliError::Interrupted(format!(
            "{} of {} trials completed",
            record.trial_count(),
            trials
        )));
    }

    let record = if args.no_store {
        record
    } else if !layout.is_standard() {
        ui::display_warning(
            err,
            "runs on a non-standard deck are not stored; pass --no-store to silence this",
        )?;
        record
    } else {
        StatsStore::new(args.store.clone().unwrap_or(cfg.store)).append(record)?
    };

    write_record(out, &record, args.json, precision, layout.is_standard())
}

fn write_record(
    out: &mut dyn Write,
    record: &StatisticsRecord,
    json: bool,
    precision: usize,
    standard: bool,
) -> Result<(), CliError> {
    if json {
        let text = serde_json::to_string_pretty(record).map_err(std::io::Error::other)?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", format_report(record, precision, standard))?;
    }
    Ok(())
}

/// Background thread that fires a [`CancellationToken`] after a deadline
/// unless disarmed first.
#[derive(Debug)]
struct Watchdog {
    disarm: Sender<()>,
    handle: JoinHandle<()>,
}

impl Watchdog {
    fn arm(seconds: f64, token: CancellationToken) -> Result<Self, CliError> {
        let limit = Duration::try_from_secs_f64(seconds)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "max-seconds must be a positive number, got {}",
                    seconds
                ))
            })?;
        let (disarm, rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name("sim-watchdog".into())
            .spawn(move || match rx.recv_timeout(limit) {
                Err(RecvTimeoutError::Timeout) => {
                    info!(seconds, "time limit reached, cancelling simulation");
                    token.cancel();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("watchdog disarmed");
                }
            })?;
        Ok(Self { disarm, handle })
    }

    fn disarm(self) -> Result<(), CliError> {
        // the thread may already have fired and exited
        let _ = self.disarm.send(());
        self.handle
            .join()
            .map_err(|_| CliError::Io(std::io::Error::other("watchdog thread panicked")))
    }
}
