//! RpcPulse - Distributed RPC workload modeling and profiling tool
//!
//! RpcPulse describes synthetic distributed workloads made of interacting
//! services exchanging RPC traffic, and generates random samples from
//! user-declared empirical distributions that drive RPC payload sizes,
//! inter-arrival times, and related workload parameters.
//!
//! # Architecture
//!
//! - **Workload description**: Services, RPCs, and protocol driver options
//! - **Joint distributions**: PMF and CDF sample generators with quantified
//!   statistical fidelity
//! - **Offline simulation**: Draw large sample populations across a worker
//!   pool and summarize them
//! - **Comprehensive stats**: Latency percentiles, sample summaries,
//!   process resource usage

pub mod config;
pub mod distribution;
pub mod stats;
pub mod system;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use distribution::SampleGenerator;

/// Result type used throughout RpcPulse
pub type Result<T> = anyhow::Result<T>;
