//! Workload definition structures

use serde::{Deserialize, Serialize};

/// A service type within the distributed system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Service type name (e.g. "load_balancer")
    pub name: String,
    /// Number of instances of this service
    #[serde(default = "default_service_count")]
    pub count: usize,
    /// Name of the protocol driver options bag this service uses
    #[serde(default)]
    pub protocol_driver_options_name: Option<String>,
}

fn default_service_count() -> usize {
    1
}

/// An RPC exchanged between two service types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSpec {
    /// RPC name (e.g. "query")
    pub name: String,
    /// Service type issuing the RPC
    pub client: String,
    /// Service type handling the RPC
    pub server: String,
    /// Name of the distribution driving request payload sizes
    pub request_payload_name: String,
    /// Name of the distribution driving inter-arrival intervals
    #[serde(default)]
    pub interval_name: Option<String>,
}
