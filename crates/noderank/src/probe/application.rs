//! Application-level probe: timed node-information request.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use super::types::NodeInfo;
use super::{Probe, ProbeReading, duration_ms};
use crate::error::ProbeError;

/// Path of the node information endpoint.
pub const INFO_PATH: &str = "/v1/chain/get_info";

/// Build the node-information URL for a host and HTTP port.
pub fn info_url(host: &str, http_port: &str) -> String {
    format!("http://{host}:{http_port}{INFO_PATH}")
}

/// Timed HTTP request probe.
///
/// Issues a GET against the node information endpoint and decodes the
/// response. The elapsed time, measured from just before send to
/// response-body-fully-decoded, is the canonical ranked sample.
pub struct ApplicationProbe {
    client: Client,
    timeout: Duration,
}

impl ApplicationProbe {
    /// Build the probe with one shared client bounded by `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("noderank/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout { limit: self.timeout }
        } else if err.is_decode() {
            ProbeError::Decode { reason: err.to_string() }
        } else {
            ProbeError::Connect { reason: err.to_string() }
        }
    }
}

#[async_trait::async_trait]
impl Probe for ApplicationProbe {
    async fn measure(&self, target: &str) -> Result<ProbeReading, ProbeError> {
        let url = Url::parse(target)
            .map_err(|err| ProbeError::Connect { reason: format!("invalid url {target}: {err}") })?;

        let start = Instant::now();
        let response = self.client.get(url).send().await.map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Connect { reason: format!("http status {status}") });
        }

        let remote_addr = response.remote_addr().map(|addr| addr.ip());
        let info: NodeInfo = response.json().await.map_err(|err| self.classify(err))?;
        let latency_ms = duration_ms(start.elapsed());

        let mut reading = ProbeReading::new(latency_ms).with_info(info);
        if let Some(addr) = remote_addr {
            reading = reading.with_remote_addr(addr);
        }
        Ok(reading)
    }

    async fn trace_remote_address(&self, target: &str) -> Option<IpAddr> {
        let response = self.client.get(target).send().await.ok()?;
        response.remote_addr().map(|addr| addr.ip())
    }
}
