//! Command handler modules for the pokerstat CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests can capture them
//! - Errors propagated via `CliError`; [`crate::run`] prints them and picks the exit code

pub mod cfg;
pub mod classify;
pub mod deal;
pub mod report;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use classify::handle_classify_command;
pub use deal::handle_deal_command;
pub use report::handle_report_command;
pub use sim::handle_sim_command;

use crate::config::{self, Config, MAX_PRECISION};
use crate::error::CliError;

pub(crate) fn load_config() -> Result<Config, CliError> {
    config::load().map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))
}

pub(crate) fn check_precision(precision: usize) -> Result<usize, CliError> {
    if precision > MAX_PRECISION {
        return Err(CliError::InvalidInput(format!(
            "precision must be <= {}",
            MAX_PRECISION
        )));
    }
    Ok(precision)
}
