//! Ranking: mean latency ordering and shortlist truncation.

use serde::Serialize;

use crate::registry::Registry;

/// One ranked shortlist row.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntry {
    /// Endpoint identifier.
    pub name: String,

    /// `host:port` pair for peer-connection configuration.
    pub peer_address: String,

    /// Mean latency across all successful samples, in milliseconds.
    pub mean_latency_ms: f64,
}

/// Rank endpoints by mean latency, fastest first.
///
/// Endpoints with no successful samples are excluded outright: they
/// contributed no signal, and a defaulted mean would rank them as
/// instant. Ties keep registry order (stable sort), so the output is
/// deterministic. The result holds at most `shortlist_size` entries and
/// is empty when nothing responded.
pub fn rank(registry: &Registry, shortlist_size: usize) -> Vec<ShortlistEntry> {
    let mut ranked: Vec<ShortlistEntry> = registry
        .endpoints()
        .iter()
        .filter_map(|endpoint| {
            endpoint.mean_latency_ms().map(|mean| ShortlistEntry {
                name: endpoint.name.clone(),
                peer_address: endpoint.peer_address(),
                mean_latency_ms: mean,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.mean_latency_ms.total_cmp(&b.mean_latency_ms));
    ranked.truncate(shortlist_size);
    ranked
}
