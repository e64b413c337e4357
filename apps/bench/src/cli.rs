use std::path::PathBuf;

use clap::Parser;

/// Probe candidate peer nodes and print the fastest as p2p peer config.
#[derive(Debug, Parser)]
#[command(name = "noderank-bench", version, about)]
pub struct Args {
    /// Path to the endpoint list JSON document.
    pub nodes: PathBuf,

    /// Number of probe cycles over the whole list.
    #[arg(long)]
    pub cycles: Option<u32>,

    /// Maximum number of shortlist entries to print.
    #[arg(long)]
    pub shortlist_size: Option<usize>,

    /// Per-attempt probe timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Optional TOML config file supplying the same parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the public IP lookup banner.
    #[arg(long)]
    pub no_ip_check: bool,
}
