mod cli;
mod config;
mod netinfo;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use noderank::{CycleRunner, ProbeExecutor, Resolver, rank, source};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logger::init();

    let args = cli::Args::parse();
    let run_config = config::resolve_run_config(&args)?;

    let mut registry = source::load_endpoints(&args.nodes)
        .with_context(|| format!("failed to load endpoint list from {}", args.nodes.display()))?;
    info!("{} nodes on list", registry.len());

    if !args.no_ip_check {
        match netinfo::find_public_ip().await {
            Some(ip) => info!("firing requests from {ip}"),
            None => warn!("could not determine public IP"),
        }
    }

    let executor =
        ProbeExecutor::new(run_config.probe_timeout).context("failed to build probe executor")?;
    let mut runner = CycleRunner::new(run_config.clone(), executor, Resolver::new());
    runner.run(&mut registry).await;

    for e in registry.endpoints() {
        match e.mean_latency_ms() {
            Some(mean) => info!(
                "{} | {}: {} samples, mean {:.2} ms",
                e.name,
                e.organization,
                e.samples().len(),
                mean
            ),
            None => info!("{} | {}: no successful samples", e.name, e.organization),
        }
    }

    let shortlist = rank(&registry, run_config.shortlist_size);
    if shortlist.is_empty() {
        println!("No results...");
        return Ok(());
    }

    println!("----------------------------");
    println!("Fastest nodes for config.ini");
    println!("----------------------------");
    for entry in &shortlist {
        println!("p2p-peer-address = {}", entry.peer_address);
    }

    Ok(())
}
