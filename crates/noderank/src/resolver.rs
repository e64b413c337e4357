//! Address resolution with per-endpoint memoization.
//!
//! A hostname may resolve to different addresses on different calls;
//! pinning the first resolved address keeps every cycle probing the same
//! concrete target. Resolution failures are transient: the memo stays
//! unset and the next cycle retries.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::debug;

use crate::error::ProbeError;
use crate::registry::Endpoint;

/// Name lookup seam. Production resolution goes through [`DnsLookup`];
/// tests substitute counting fakes.
#[async_trait::async_trait]
pub trait AddressLookup: Send + Sync {
    /// Resolve a hostname to candidate addresses, preferred first.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError>;
}

/// System name resolution via tokio.
pub struct DnsLookup;

#[async_trait::async_trait]
impl AddressLookup for DnsLookup {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
        // lookup_host wants a socket address; the port is irrelevant here.
        let addrs = tokio::net::lookup_host((host, 0u16))
            .await
            .map_err(|err| ProbeError::Resolution { host: host.to_string(), reason: err.to_string() })?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// Resolves and pins each endpoint's probe address.
pub struct Resolver {
    lookup: Arc<dyn AddressLookup>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_lookup(Arc::new(DnsLookup))
    }

    /// Build a resolver over an explicit lookup implementation.
    pub fn with_lookup(lookup: Arc<dyn AddressLookup>) -> Self {
        Self { lookup }
    }

    /// Return the endpoint's pinned address, resolving and pinning it on
    /// first use. `None` means resolution failed this cycle; the memo
    /// stays unset so the next cycle retries.
    pub async fn resolve(&self, endpoint: &mut Endpoint) -> Option<IpAddr> {
        if let Some(addr) = endpoint.resolved_addr {
            return Some(addr);
        }

        match self.lookup.lookup(&endpoint.hostname).await {
            Ok(addrs) => match addrs.first() {
                Some(&addr) => {
                    debug!("resolved {} to {}", endpoint.name, addr);
                    endpoint.resolved_addr = Some(addr);
                    Some(addr)
                }
                None => {
                    debug!("no addresses for {} ({})", endpoint.name, endpoint.hostname);
                    None
                }
            },
            Err(err) => {
                debug!("{}: {}", endpoint.name, err);
                None
            }
        }
    }

    /// Pin an address discovered outside the lookup path (connection
    /// tracing). Never replaces an already pinned address.
    pub fn store(&self, endpoint: &mut Endpoint, addr: IpAddr) {
        if endpoint.resolved_addr.is_none() {
            endpoint.resolved_addr = Some(addr);
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Lookup fake that counts invocations.
    struct CountingLookup {
        addrs: Vec<IpAddr>,
        calls: AtomicUsize,
    }

    impl CountingLookup {
        fn returning(addrs: Vec<IpAddr>) -> Arc<Self> {
            Arc::new(Self { addrs, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AddressLookup for CountingLookup {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.addrs.is_empty() {
                return Err(ProbeError::Resolution {
                    host: host.to_string(),
                    reason: "no such host".to_string(),
                });
            }
            Ok(self.addrs.clone())
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("alpha", "org", "earth", "alpha.example", "8888", "443", "9876")
    }

    #[tokio::test]
    async fn test_resolution_is_memoized() {
        let lookup = CountingLookup::returning(vec!["192.0.2.1".parse().unwrap()]);
        let resolver = Resolver::with_lookup(lookup.clone());
        let mut e = endpoint();

        let first = resolver.resolve(&mut e).await;
        let second = resolver.resolve(&mut e).await;

        assert_eq!(first, second);
        assert_eq!(first, Some("192.0.2.1".parse().unwrap()));
        assert_eq!(lookup.calls(), 1, "second resolve must not perform a lookup");
    }

    #[tokio::test]
    async fn test_failed_resolution_retries_next_time() {
        let lookup = CountingLookup::returning(vec![]);
        let resolver = Resolver::with_lookup(lookup.clone());
        let mut e = endpoint();

        assert_eq!(resolver.resolve(&mut e).await, None);
        assert_eq!(e.resolved_addr(), None, "failure must not pin an address");

        assert_eq!(resolver.resolve(&mut e).await, None);
        assert_eq!(lookup.calls(), 2, "each cycle retries after a failure");
    }

    #[tokio::test]
    async fn test_first_address_wins() {
        let lookup = CountingLookup::returning(vec![
            "192.0.2.1".parse().unwrap(),
            "192.0.2.2".parse().unwrap(),
        ]);
        let resolver = Resolver::with_lookup(lookup);
        let mut e = endpoint();

        assert_eq!(resolver.resolve(&mut e).await, Some("192.0.2.1".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_store_never_replaces_pinned_address() {
        let resolver = Resolver::with_lookup(CountingLookup::returning(vec![]));
        let mut e = endpoint();

        resolver.store(&mut e, "192.0.2.1".parse().unwrap());
        assert_eq!(e.resolved_addr(), Some("192.0.2.1".parse().unwrap()));

        resolver.store(&mut e, "192.0.2.9".parse().unwrap());
        assert_eq!(e.resolved_addr(), Some("192.0.2.1".parse().unwrap()));
    }
}
