//! Configuration module
//!
//! Handles CLI argument parsing, TOML workload files, and validation.

pub mod cli;
pub mod distribution;
pub mod settings;
pub mod toml;
pub mod validator;
pub mod workload;

use serde::{Deserialize, Serialize};

pub use distribution::{CdfPoint, DataPoint, DistributionConfig, PmfPoint};
pub use settings::{NamedSetting, ProtocolDriverOptions};
pub use workload::{RpcSpec, ServiceSpec};

/// Complete workload description
///
/// Describes a synthetic distributed system: the services it is made of, the
/// RPCs they exchange, the empirical distributions driving RPC traffic shape,
/// and the protocol driver options referenced by services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Services making up the distributed system
    pub services: Vec<ServiceSpec>,
    /// RPCs exchanged between services
    #[serde(default)]
    pub rpcs: Vec<RpcSpec>,
    /// Empirical distributions referenced by RPCs
    #[serde(default)]
    pub distributions: Vec<DistributionConfig>,
    /// Protocol driver option bags referenced by services
    #[serde(default)]
    pub driver_options: Vec<ProtocolDriverOptions>,
}

impl Config {
    /// Look up a distribution by name
    pub fn find_distribution(&self, name: &str) -> Option<&DistributionConfig> {
        self.distributions.iter().find(|d| d.name == name)
    }

    /// Look up a protocol driver options bag by name
    pub fn find_driver_options(&self, name: &str) -> Option<&ProtocolDriverOptions> {
        self.driver_options.iter().find(|o| o.name == name)
    }
}
