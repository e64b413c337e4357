//! Endpoint records and the in-memory registry.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// One candidate peer node.
///
/// The serde field names match the endpoint list document; the resolved
/// address and the sample list are run-local measurement state and never
/// leave the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Stable identifier of the producer.
    #[serde(rename = "bp_name")]
    pub name: String,

    /// Operating organization. Opaque metadata, never used in ranking.
    #[serde(rename = "organisation")]
    pub organization: String,

    /// Announced location label. Opaque metadata.
    pub location: String,

    /// Hostname (or literal address) the node announces.
    #[serde(rename = "node_addr")]
    pub hostname: String,

    #[serde(rename = "port_http")]
    pub http_port: String,

    #[serde(rename = "port_ssl")]
    pub ssl_port: String,

    #[serde(rename = "port_p2p")]
    pub p2p_port: String,

    /// Address pinned by the first successful resolution. Written only
    /// through [`Resolver`](crate::resolver::Resolver).
    #[serde(skip)]
    pub(crate) resolved_addr: Option<IpAddr>,

    /// Successful latency measurements in milliseconds. Append-only
    /// during a run.
    #[serde(skip)]
    pub(crate) samples: Vec<f64>,
}

impl Endpoint {
    /// Build an endpoint from its addressing metadata.
    pub fn new(
        name: impl Into<String>,
        organization: impl Into<String>,
        location: impl Into<String>,
        hostname: impl Into<String>,
        http_port: impl Into<String>,
        ssl_port: impl Into<String>,
        p2p_port: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            location: location.into(),
            hostname: hostname.into(),
            http_port: http_port.into(),
            ssl_port: ssl_port.into(),
            p2p_port: p2p_port.into(),
            resolved_addr: None,
            samples: Vec::new(),
        }
    }

    /// Append one successful latency measurement in milliseconds.
    pub fn record_sample(&mut self, latency_ms: f64) {
        self.samples.push(latency_ms);
    }

    /// Successful latency measurements recorded so far.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Address pinned by resolution, if any.
    pub fn resolved_addr(&self) -> Option<IpAddr> {
        self.resolved_addr
    }

    /// Arithmetic mean of all recorded samples, `None` when no attempt
    /// succeeded. Endpoints without a mean must not be ranked.
    pub fn mean_latency_ms(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Host the probes should dial: the pinned resolved address when
    /// available, otherwise the configured hostname.
    pub fn probe_host(&self) -> String {
        match self.resolved_addr {
            Some(addr) => addr.to_string(),
            None => self.hostname.clone(),
        }
    }

    /// `host:port` pair for peer-connection configuration output.
    pub fn peer_address(&self) -> String {
        format!("{}:{}", self.probe_host(), self.p2p_port)
    }
}

/// Ordered collection of the candidate endpoints for one run.
///
/// A passive container: iteration order is load order, and nothing here
/// reorders or filters. The scheduler mutates endpoints in place; the
/// ranker reads them after the run completes.
#[derive(Debug, Default)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
}

impl Registry {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub(crate) fn endpoint_mut(&mut self, index: usize) -> Option<&mut Endpoint> {
        self.endpoints.get_mut(index)
    }

    /// Clear every endpoint's sample list. Called at the start of a run
    /// so samples never mix across unrelated runs. Resolved addresses
    /// are kept: the memo stays valid for the process lifetime.
    pub fn reset_samples(&mut self) {
        for endpoint in &mut self.endpoints {
            endpoint.samples.clear();
        }
    }
}
