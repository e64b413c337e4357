//! Measurement result types.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Decoded body of the node information endpoint.
///
/// Diagnostic only: the engine ranks on timing, never on these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub server_version: String,
    pub head_block_num: i64,
    pub head_block_producer: String,
    pub head_block_time: String,
    pub head_block_id: String,
    pub last_irreversible_block_num: i64,
}

/// Successful outcome of one probe attempt.
#[derive(Debug, Clone)]
pub struct ProbeReading {
    /// Canonical latency of the attempt in milliseconds. For transport
    /// probes this is time-to-first-byte; for application probes it is
    /// wall-clock to response-body-fully-decoded.
    pub latency_ms: f64,

    /// Time to the full response (EOF), transport probes only.
    pub total_ms: Option<f64>,

    /// Address the client actually connected to, when traceable.
    pub remote_addr: Option<IpAddr>,

    /// Decoded node information, application probes only.
    pub info: Option<NodeInfo>,
}

impl ProbeReading {
    /// Create a reading carrying only the canonical latency.
    pub fn new(latency_ms: f64) -> Self {
        Self { latency_ms, total_ms: None, remote_addr: None, info: None }
    }

    /// Attach the full-response timing.
    pub fn with_total(mut self, total_ms: f64) -> Self {
        self.total_ms = Some(total_ms);
        self
    }

    /// Attach the traced remote address.
    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// Attach the decoded node information.
    pub fn with_info(mut self, info: NodeInfo) -> Self {
        self.info = Some(info);
        self
    }
}
