//! Cycle scheduler: drives repeated probe passes over the registry.

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::probe::{ProbeExecutor, ProbeKind, application};
use crate::registry::Registry;
use crate::resolver::Resolver;

/// Progress of a probing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Probing,
    Complete,
}

/// Drives `cycles` sequential passes over every registered endpoint.
///
/// Endpoints are probed one at a time, in registry order, with at most
/// one outstanding probe. Per-attempt failures are logged and contained
/// here; one endpoint's failure never aborts the cycle or the run.
pub struct CycleRunner {
    config: RunConfig,
    executor: ProbeExecutor,
    resolver: Resolver,
    state: RunState,
}

impl CycleRunner {
    pub fn new(config: RunConfig, executor: ProbeExecutor, resolver: Resolver) -> Self {
        Self { config, executor, resolver, state: RunState::Idle }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run all cycles, recording successful samples into the registry.
    pub async fn run(&mut self, registry: &mut Registry) {
        registry.reset_samples();

        for cycle in 0..self.config.cycles {
            debug!("probe cycle {}/{}", cycle + 1, self.config.cycles);
            for index in 0..registry.len() {
                self.probe_endpoint(registry, index).await;
            }
        }

        self.state = RunState::Complete;
    }

    async fn probe_endpoint(&mut self, registry: &mut Registry, index: usize) {
        self.state = RunState::Resolving;
        let Some(endpoint) = registry.endpoint_mut(index) else { return };

        if self.resolver.resolve(endpoint).await.is_none() {
            // The host may still be dialable when local resolution fails;
            // learn the concrete address from the connection itself.
            let url = application::info_url(&endpoint.hostname, &endpoint.http_port);
            if let Some(addr) = self.executor.trace_remote_address(&url).await {
                debug!("traced {} to {}", endpoint.name, addr);
                self.resolver.store(endpoint, addr);
            }
        }

        self.state = RunState::Probing;
        let host = endpoint.probe_host();

        // Diagnostic transport timing; never ranked.
        let connect_target = format!("{host}:{}", endpoint.http_port);
        match self.executor.execute(ProbeKind::Transport, &connect_target).await {
            Ok(reading) => debug!(
                "{}: first byte {:.2} ms, full response {:.2} ms",
                endpoint.name,
                reading.latency_ms,
                reading.total_ms.unwrap_or(reading.latency_ms)
            ),
            Err(err) => debug!("{}: transport probe failed: {}", endpoint.name, err),
        }

        // Canonical sample: the node-information round trip.
        let url = application::info_url(&host, &endpoint.http_port);
        match self.executor.execute(ProbeKind::Application, &url).await {
            Ok(reading) => {
                if let Some(node) = &reading.info {
                    debug!(
                        "{}: head block {} by {}",
                        endpoint.name, node.head_block_num, node.head_block_producer
                    );
                }
                // A round-robined hostname can land on another backend
                // than the pinned one; worth seeing in the logs.
                if let (Some(pinned), Some(observed)) =
                    (endpoint.resolved_addr(), reading.remote_addr)
                {
                    if pinned != observed {
                        debug!("{}: connected to {} instead of pinned {}", endpoint.name, observed, pinned);
                    }
                }
                info!("{}: latency {:.2} ms", endpoint.name, reading.latency_ms);
                endpoint.record_sample(reading.latency_ms);
            }
            Err(err) => warn!("{}: probe failed: {}", endpoint.name, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::IpAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::error::ProbeError;
    use crate::probe::{Probe, ProbeReading};
    use crate::rank::rank;
    use crate::registry::Endpoint;
    use crate::resolver::AddressLookup;

    /// Lookup fake mapping hostnames to fixed addresses.
    struct MapLookup {
        map: HashMap<String, IpAddr>,
    }

    #[async_trait::async_trait]
    impl AddressLookup for MapLookup {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
            match self.map.get(host) {
                Some(&addr) => Ok(vec![addr]),
                None => Err(ProbeError::Resolution {
                    host: host.to_string(),
                    reason: "no such host".to_string(),
                }),
            }
        }
    }

    /// Probe fake answering with a fixed latency per target substring,
    /// failing targets listed in `fail`.
    struct MapProbe {
        latencies: HashMap<String, f64>,
        fail: Vec<String>,
    }

    #[async_trait::async_trait]
    impl Probe for MapProbe {
        async fn measure(&self, target: &str) -> Result<ProbeReading, ProbeError> {
            if self.fail.iter().any(|key| target.contains(key.as_str())) {
                return Err(ProbeError::Connect { reason: "wired to fail".to_string() });
            }
            let latency = self
                .latencies
                .iter()
                .find(|(key, _)| target.contains(key.as_str()))
                .map(|(_, &ms)| ms);
            match latency {
                Some(ms) => Ok(ProbeReading::new(ms)),
                None => Err(ProbeError::Connect { reason: format!("unknown target {target}") }),
            }
        }
    }

    fn endpoint(name: &str, host: &str) -> Endpoint {
        Endpoint::new(name, "org", "earth", host, "8888", "443", "9876")
    }

    fn fixture(fail: Vec<String>) -> (CycleRunner, Registry) {
        let registry = Registry::new(vec![
            endpoint("alpha", "alpha.example"),
            endpoint("beta", "beta.example"),
            endpoint("gamma", "gamma.example"),
        ]);

        let lookup = MapLookup {
            map: HashMap::from([
                ("alpha.example".to_string(), "10.0.0.1".parse().unwrap()),
                ("beta.example".to_string(), "10.0.0.2".parse().unwrap()),
                ("gamma.example".to_string(), "10.0.0.3".parse().unwrap()),
            ]),
        };

        let probe = Arc::new(MapProbe {
            latencies: HashMap::from([
                ("10.0.0.1".to_string(), 30.0),
                ("10.0.0.2".to_string(), 10.0),
                ("10.0.0.3".to_string(), 20.0),
            ]),
            fail,
        });

        let executor = ProbeExecutor::with_probes(probe.clone(), probe);
        let config = RunConfig {
            cycles: 3,
            shortlist_size: 6,
            probe_timeout: Duration::from_secs(1),
        };
        let runner = CycleRunner::new(config, executor, Resolver::with_lookup(Arc::new(lookup)));
        (runner, registry)
    }

    #[tokio::test]
    async fn test_run_reaches_complete_and_records_every_cycle() {
        let (mut runner, mut registry) = fixture(vec![]);
        assert_eq!(runner.state(), RunState::Idle);

        runner.run(&mut registry).await;

        assert_eq!(runner.state(), RunState::Complete);
        for e in registry.endpoints() {
            assert_eq!(e.samples().len(), 3, "{} must have one sample per cycle", e.name);
        }
    }

    #[tokio::test]
    async fn test_one_failing_endpoint_never_aborts_the_run() {
        let (mut runner, mut registry) = fixture(vec!["10.0.0.2".to_string()]);
        runner.run(&mut registry).await;

        assert_eq!(runner.state(), RunState::Complete);
        let ranked = rank(&registry, 6);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "gamma");
        assert_eq!(ranked[1].name, "alpha");
    }

    #[tokio::test]
    async fn test_all_failures_produce_empty_shortlist() {
        let (mut runner, mut registry) = fixture(vec!["10.0.0.".to_string()]);
        runner.run(&mut registry).await;

        assert_eq!(runner.state(), RunState::Complete);
        assert!(rank(&registry, 6).is_empty());
    }

    #[tokio::test]
    async fn test_rerun_resets_samples() {
        let (mut runner, mut registry) = fixture(vec![]);
        runner.run(&mut registry).await;
        runner.run(&mut registry).await;

        for e in registry.endpoints() {
            assert_eq!(e.samples().len(), 3, "samples must not mix across runs");
        }
    }

    #[tokio::test]
    async fn test_unresolvable_endpoint_is_probed_by_hostname() {
        // delta.example is absent from the lookup map, so resolution
        // fails every cycle and the probes dial the hostname directly.
        let mut registry = Registry::new(vec![endpoint("delta", "delta.example")]);

        let lookup = MapLookup { map: HashMap::new() };
        let probe = Arc::new(MapProbe {
            latencies: HashMap::from([("delta.example".to_string(), 12.0)]),
            fail: vec![],
        });
        let executor = ProbeExecutor::with_probes(probe.clone(), probe);
        let config = RunConfig { cycles: 2, shortlist_size: 6, probe_timeout: Duration::from_secs(1) };
        let mut runner = CycleRunner::new(config, executor, Resolver::with_lookup(Arc::new(lookup)));

        runner.run(&mut registry).await;

        let e = &registry.endpoints()[0];
        assert_eq!(e.resolved_addr(), None);
        assert_eq!(e.samples().len(), 2);
    }
}
