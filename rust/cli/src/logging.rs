//! Tracing subscriber setup.
//!
//! Logs go to stderr so report output on stdout stays clean. `RUST_LOG`
//! takes precedence; otherwise `--verbose` selects `debug` and the default
//! is `warn`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // a second call (tests drive `run` repeatedly) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
