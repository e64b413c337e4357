//! Run-parameter overlay: defaults, then config file, then CLI flags.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use noderank::RunConfig;

use crate::cli::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// File-supplied parameters. Absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub cycles: Option<u32>,
    pub shortlist_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }
}

/// Fold defaults, config file, and CLI flags into the validated run
/// configuration. Flags win over file values, file values over defaults.
pub fn resolve_run_config(args: &Args) -> anyhow::Result<RunConfig> {
    let file = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let mut config = RunConfig::default();
    if let Some(cycles) = args.cycles.or(file.cycles) {
        config.cycles = cycles;
    }
    if let Some(size) = args.shortlist_size.or(file.shortlist_size) {
        config.shortlist_size = size;
    }
    if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
        config.probe_timeout = Duration::from_secs(secs);
    }

    config.validate()?;
    Ok(config)
}
