//! Layered configuration: built-in defaults, then an optional TOML file
//! named by `POKERSTAT_CONFIG`, then `POKERSTAT_*` environment variables.
//! Command-line flags override the result in the command handlers.

use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

use crate::formatters::DEFAULT_PRECISION;
use pokerstat_engine::sim::MAX_WORKERS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub trials: u64,
    pub seed: Option<u64>,
    pub workers: usize,
    pub store: String,
    pub precision: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub trials: ValueSource,
    pub seed: ValueSource,
    pub workers: ValueSource,
    pub store: ValueSource,
    pub precision: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            trials: ValueSource::Default,
            seed: ValueSource::Default,
            workers: ValueSource::Default,
            store: ValueSource::Default,
            precision: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            seed: None,
            workers: 0,
            store: "stats.csv".into(),
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Largest accepted `precision`.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("POKERSTAT_CONFIG")
        && !path.is_empty()
    {
        debug!(path = %path, "reading config file");
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.workers {
            cfg.workers = v;
            sources.workers = ValueSource::File;
        }
        if let Some(v) = f.store {
            cfg.store = v;
            sources.store = ValueSource::File;
        }
        if let Some(v) = f.precision {
            cfg.precision = v;
            sources.precision = ValueSource::File;
        }
    }

    if let Some(v) = env_value("POKERSTAT_TRIALS", "trials")? {
        cfg.trials = v;
        sources.trials = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSTAT_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSTAT_WORKERS", "workers")? {
        cfg.workers = v;
        sources.workers = ValueSource::Env;
    }
    if let Ok(store) = std::env::var("POKERSTAT_STORE")
        && !store.is_empty()
    {
        cfg.store = store;
        sources.store = ValueSource::Env;
    }
    if let Some(v) = env_value("POKERSTAT_PRECISION", "precision")? {
        cfg.precision = v;
        sources.precision = ValueSource::Env;
    }

    validate(&cfg)?;
    debug!(?cfg, "configuration resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(var: &str, name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, v))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    trials: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    store: Option<String>,
    #[serde(default)]
    precision: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trials must be >=1".into(),
        ));
    }
    if cfg.workers > MAX_WORKERS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: workers must be <={}",
            MAX_WORKERS
        )));
    }
    if cfg.store.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: store path must not be empty".into(),
        ));
    }
    if cfg.precision > MAX_PRECISION {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: precision must be <={}",
            MAX_PRECISION
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 6] = [
        "POKERSTAT_CONFIG",
        "POKERSTAT_TRIALS",
        "POKERSTAT_SEED",
        "POKERSTAT_WORKERS",
        "POKERSTAT_STORE",
        "POKERSTAT_PRECISION",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_without_file_or_env() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.trials, ValueSource::Default);
        assert_eq!(resolved.sources.store, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trials = 5000\nseed = 7\nstore = \"runs.csv\"").unwrap();
        unsafe {
            std::env::set_var("POKERSTAT_CONFIG", file.path());
            std::env::set_var("POKERSTAT_SEED", "99");
        }

        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.trials, 5000);
        assert_eq!(resolved.sources.trials, ValueSource::File);
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.store, "runs.csv");
        assert_eq!(resolved.sources.workers, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn invalid_values_are_rejected() {
        clear_env();
        unsafe { std::env::set_var("POKERSTAT_TRIALS", "0") };
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));

        unsafe { std::env::set_var("POKERSTAT_TRIALS", "lots") };
        let err = load().unwrap_err();
        assert!(err.to_string().contains("Invalid trials"));

        unsafe { std::env::set_var("POKERSTAT_TRIALS", "10") };
        unsafe { std::env::set_var("POKERSTAT_PRECISION", "40") };
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));

        unsafe { std::env::remove_var("POKERSTAT_PRECISION") };
        unsafe { std::env::set_var("POKERSTAT_WORKERS", "100000000") };
        let err = load().unwrap_err();
        assert!(err.to_string().contains("workers must be <=1024"), "{err}");
        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_file_keys_fail_to_parse() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hands = 10").unwrap();
        unsafe { std::env::set_var("POKERSTAT_CONFIG", file.path()) };
        let result = load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
