//! Error taxonomy for the probing engine.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single probe attempt.
///
/// Every variant is recovered at the scheduler boundary: the attempt
/// records no sample and the run continues with the next endpoint.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Address resolution did not succeed for the endpoint this cycle.
    /// Retried on the next cycle.
    #[error("address resolution failed for {host}: {reason}")]
    Resolution { host: String, reason: String },

    /// The probe failed to connect, write, or read.
    #[error("connection failed: {reason}")]
    Connect { reason: String },

    /// The probe exceeded the configured time limit.
    #[error("probe timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// A response arrived but failed structured decoding.
    #[error("response decoding failed: {reason}")]
    Decode { reason: String },
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::Connect { reason: err.to_string() }
    }
}

/// Failure to load the endpoint list. Fatal: with no endpoints there is
/// nothing to probe.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read endpoint list: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse endpoint list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("endpoint list contains no endpoints")]
    Empty,
}
