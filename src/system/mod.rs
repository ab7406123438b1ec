//! Distributed system enumeration helpers
//!
//! Flatten a workload description into dense indexes: service types, RPCs,
//! and individual service instances all get stable integer ids derived from
//! declaration order. Traffic engines address log entries and cumulative
//! tables by these ids instead of by name.

use anyhow::bail;
use std::collections::BTreeMap;

use crate::config::{Config, ServiceSpec};
use crate::Result;

/// Canonical name of one service instance, e.g. `"root/2"`
pub fn service_instance_name(service_type: &str, instance: usize) -> String {
    assert!(!service_type.is_empty(), "service type must be non-empty");
    format!("{}/{}", service_type, instance)
}

/// Map each service type name to a dense index in declaration order
pub fn enumerate_service_types(config: &Config) -> BTreeMap<String, usize> {
    let mut ret = BTreeMap::new();
    for service in &config.services {
        let index = ret.len();
        ret.insert(service.name.clone(), index);
    }
    ret
}

/// Map each service type name to its instance count
pub fn enumerate_service_sizes(config: &Config) -> BTreeMap<String, usize> {
    let mut ret = BTreeMap::new();
    for service in &config.services {
        ret.insert(service.name.clone(), service.count);
    }
    ret
}

/// Map each RPC name to a dense index in declaration order
pub fn enumerate_rpcs(config: &Config) -> BTreeMap<String, usize> {
    let mut ret = BTreeMap::new();
    for rpc in &config.rpcs {
        let index = ret.len();
        ret.insert(rpc.name.clone(), index);
    }
    ret
}

/// Map every service instance (`"type/i"`) to a dense global id
pub fn enumerate_service_instance_ids(config: &Config) -> BTreeMap<String, usize> {
    let mut ret = BTreeMap::new();
    for service in &config.services {
        for i in 0..service.count {
            let instance = service_instance_name(&service.name, i);
            let index = ret.len();
            ret.insert(instance, index);
        }
    }
    ret
}

/// Find a service spec by name
pub fn get_service_spec<'a>(name: &str, config: &'a Config) -> Result<&'a ServiceSpec> {
    for service in &config.services {
        if service.name == name {
            return Ok(service);
        }
    }
    bail!("Service not found: {}", name);
}
