//! noderank - peer endpoint probing and latency ranking engine.
//!
//! This library measures reachability and latency to a set of candidate
//! peer nodes over repeated probe cycles, tolerates per-endpoint failure
//! without aborting the run, and ranks the fastest reachable endpoints
//! into a connection shortlist.

pub mod config;
pub mod error;
pub mod probe;
pub mod rank;
pub mod registry;
pub mod resolver;
pub mod scheduler;
pub mod source;

// Re-export main types
pub use config::RunConfig;
pub use error::{ProbeError, SourceError};
pub use probe::{ApplicationProbe, NodeInfo, Probe, ProbeExecutor, ProbeKind, ProbeReading, TransportProbe};
pub use rank::{ShortlistEntry, rank};
pub use registry::{Endpoint, Registry};
pub use resolver::{AddressLookup, DnsLookup, Resolver};
pub use scheduler::{CycleRunner, RunState};
