//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// RpcPulse - Distributed RPC workload modeling and profiling tool
#[derive(Parser, Debug)]
#[command(name = "rpcpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML workload description to load
    #[arg(value_name = "WORKLOAD")]
    pub workload: PathBuf,

    /// Validate the workload and exit without simulating
    #[arg(long)]
    pub validate_only: bool,

    /// Number of samples to draw per RPC
    #[arg(long, default_value = "100000")]
    pub reps: usize,

    /// Seed the sample generators for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the worker pool size for all RPCs
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Print debug timing information
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments from the process environment
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
