//! Probe executor: one probe per mode, dispatched per attempt.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use super::{ApplicationProbe, Probe, ProbeReading, TransportProbe};
use crate::error::ProbeError;

/// Which measurement strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Raw TCP connect/request timing. Diagnostic only.
    Transport,
    /// Node-information request timing. The ranked sample.
    Application,
}

/// Owns one probe per mode and dispatches attempts to them.
pub struct ProbeExecutor {
    transport: Arc<dyn Probe>,
    application: Arc<dyn Probe>,
}

impl ProbeExecutor {
    /// Build the production executor with both probes bounded by `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            transport: Arc::new(TransportProbe::new(timeout)),
            application: Arc::new(ApplicationProbe::new(timeout)?),
        })
    }

    /// Assemble an executor from explicit probe implementations.
    pub fn with_probes(transport: Arc<dyn Probe>, application: Arc<dyn Probe>) -> Self {
        Self { transport, application }
    }

    /// Run one measurement of the given kind against the target.
    pub async fn execute(&self, kind: ProbeKind, target: &str) -> Result<ProbeReading, ProbeError> {
        match kind {
            ProbeKind::Transport => self.transport.measure(target).await,
            ProbeKind::Application => self.application.measure(target).await,
        }
    }

    /// Learn the address the application probe actually dials.
    pub async fn trace_remote_address(&self, target: &str) -> Option<IpAddr> {
        self.application.trace_remote_address(target).await
    }
}
