//! Run parameters and their bounds.

use std::time::Duration;

use thiserror::Error;

/// Default number of probe cycles per run.
pub const DEFAULT_CYCLES: u32 = 5;

/// Default number of shortlist entries.
pub const DEFAULT_SHORTLIST_SIZE: usize = 6;

/// Default per-attempt probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const MIN_CYCLES: u32 = 1;
const MAX_CYCLES: u32 = 50;
const MIN_PROBE_TIMEOUT: Duration = Duration::from_millis(100);
const MAX_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cycle count out of range: {cycles} (valid: {MIN_CYCLES}-{MAX_CYCLES})")]
    CyclesOutOfRange { cycles: u32 },

    #[error("shortlist size must be at least 1")]
    ShortlistTooSmall,

    #[error("probe timeout out of range: {timeout:?} (valid: {MIN_PROBE_TIMEOUT:?}-{MAX_PROBE_TIMEOUT:?})")]
    TimeoutOutOfRange { timeout: Duration },
}

/// Parameters of one probing run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// How many full passes over the endpoint list to make.
    pub cycles: u32,

    /// Maximum number of ranked entries to emit.
    pub shortlist_size: usize,

    /// Upper bound on any single probe attempt.
    pub probe_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl RunConfig {
    /// Check every parameter against its documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycles < MIN_CYCLES || self.cycles > MAX_CYCLES {
            return Err(ConfigError::CyclesOutOfRange { cycles: self.cycles });
        }

        if self.shortlist_size == 0 {
            return Err(ConfigError::ShortlistTooSmall);
        }

        if self.probe_timeout < MIN_PROBE_TIMEOUT || self.probe_timeout > MAX_PROBE_TIMEOUT {
            return Err(ConfigError::TimeoutOutOfRange { timeout: self.probe_timeout });
        }

        Ok(())
    }
}
