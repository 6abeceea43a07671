//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! configuration with the source of each value (default, file, or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "trials": {
//!     "value": 1000000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let display = serde_json::json!({
        "trials": {
            "value": config.trials,
            "source": sources.trials,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "workers": {
            "value": config.workers,
            "source": sources.workers,
        },
        "store": {
            "value": config.store,
            "source": sources.store,
        },
        "precision": {
            "value": config.precision,
            "source": sources.precision,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_every_key_with_source() {
        for var in [
            "POKERSTAT_CONFIG",
            "POKERSTAT_TRIALS",
            "POKERSTAT_SEED",
            "POKERSTAT_WORKERS",
            "POKERSTAT_STORE",
            "POKERSTAT_PRECISION",
        ] {
            unsafe { std::env::remove_var(var) };
        }
        let mut out = Vec::new();
        handle_cfg_command(&mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&output).expect("cfg output should be valid JSON");
        for key in ["trials", "seed", "workers", "store", "precision"] {
            assert_eq!(json[key]["source"], "default", "{key}");
        }
        assert_eq!(json["trials"]["value"], 1_000_000);
        assert!(json["seed"]["value"].is_null());
        assert!(output.contains("\n  "), "output should be pretty-printed");
    }
}
