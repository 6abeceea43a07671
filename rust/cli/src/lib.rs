//! # pokerstat CLI Library
//!
//! Command-line front end for the pokerstat engine: runs hand-frequency
//! simulations, keeps a CSV history of them, and prints reports.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["pokerstat", "sim", "--trials", "100000", "--seed", "42"];
//! let code = pokerstat_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Sample hands, print category frequencies, append the run to the store
//! - `report`: Show stored runs
//! - `classify`: Classify five cards given on the command line
//! - `deal`: Draw and classify a single hand
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
mod logging;
#[macro_use]
mod macros;
pub mod store;
pub mod ui;

use cli::{Commands, PokerstatCli};
use commands::{
    handle_cfg_command, handle_classify_command, handle_deal_command, handle_report_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "report", "classify", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for a cancelled run
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["pokerstat", "deal", "--seed", "42"];
/// let code = pokerstat_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PokerstatCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    return exit_code::SUCCESS;
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "pokerstat: five-card hand frequency simulator");
                    write_or_exit!(err, "Usage: pokerstat <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: pokerstat --help");
                    return exit_code::ERROR;
                }
            }
        }
    };

    logging::init(cli.verbose);

    let result = match cli.cmd {
        Commands::Sim(args) => handle_sim_command(&args, out, err),
        Commands::Report {
            store,
            run,
            all,
            precision,
        } => handle_report_command(store, run, all, precision, out, err),
        Commands::Classify { cards, layout } => handle_classify_command(&cards, layout, out),
        Commands::Deal { seed, layout } => handle_deal_command(seed, layout, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // the sim handler already explained the cancellation
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            if ui::write_error(err, &e.to_string()).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_list_matches_subcommands() {
        use clap::CommandFactory;
        let cmd = PokerstatCli::command();
        let names: Vec<&str> = cmd
            .get_subcommands()
            .map(|s| s.get_name())
            .filter(|n| *n != "help")
            .collect();
        assert_eq!(names, COMMANDS);
    }

    #[test]
    fn test_classify_requires_exactly_five_cards() {
        assert!(PokerstatCli::try_parse_from(["pokerstat", "classify", "As", "Ks"]).is_err());
        assert!(
            PokerstatCli::try_parse_from(["pokerstat", "classify", "As", "Ks", "Qs", "Js", "Ts", "9s"])
                .is_err()
        );
        assert!(
            PokerstatCli::try_parse_from(["pokerstat", "classify", "As", "Ks", "Qs", "Js", "Ts"])
                .is_ok()
        );
    }

    #[test]
    fn test_report_run_conflicts_with_all() {
        let result =
            PokerstatCli::try_parse_from(["pokerstat", "report", "--run", "1", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = PokerstatCli::try_parse_from(["pokerstat", "deal", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_sim_layout_defaults_to_standard_deck() {
        let cli = PokerstatCli::try_parse_from(["pokerstat", "sim"]).unwrap();
        let Commands::Sim(args) = cli.cmd else {
            panic!("expected sim");
        };
        assert_eq!(args.layout.suits, 4);
        assert_eq!(args.layout.ranks, 13);
        assert_eq!(args.hand_size, 5);
        assert!(args.trials.is_none());
    }
}
