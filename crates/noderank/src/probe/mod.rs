//! Probe execution: timed reachability measurements against endpoints.
//!
//! Two measurement strategies sit behind one [`Probe`] trait: a raw
//! transport-level connect/request probe (diagnostic) and an
//! application-level node-information request (the ranked sample). Both
//! are bounded by the configured timeout; neither may block a run.

use std::net::IpAddr;
use std::time::Duration;

use crate::error::ProbeError;

pub mod application;
pub mod executor;
pub mod transport;
pub mod types;

pub use application::{ApplicationProbe, info_url};
pub use executor::{ProbeExecutor, ProbeKind};
pub use transport::TransportProbe;
pub use types::{NodeInfo, ProbeReading};

/// A timed reachability measurement strategy.
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Measure the target once, returning the timed reading.
    async fn measure(&self, target: &str) -> Result<ProbeReading, ProbeError>;

    /// Perform the measurement solely to learn the address the client
    /// actually connects to. `None` on any failure; never errors upward.
    async fn trace_remote_address(&self, target: &str) -> Option<IpAddr> {
        let _ = target;
        None
    }
}

pub(crate) fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
