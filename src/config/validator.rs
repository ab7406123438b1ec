//! Configuration validation

use anyhow::bail;
use std::collections::HashSet;

use super::distribution::{DataPoint, DistributionConfig};
use super::Config;
use crate::Result;

/// Absolute tolerance applied when checking that probability masses close at 1.
///
/// The observed total is reported verbatim in diagnostics, never rounded.
const MASS_TOLERANCE: f64 = 1e-3;

/// Validate a single empirical distribution declaration
///
/// Pure function over the config; checks run in a fixed order and the first
/// failing check produces the diagnostic. The diagnostic strings are part of
/// the observable contract of the generator subsystem.
pub fn validate_distribution_config(config: &DistributionConfig) -> Result<()> {
    let has_pmf = !config.pmf_points.is_empty();
    let has_cdf = !config.cdf_points.is_empty();
    if has_pmf == has_cdf {
        bail!(
            "Exactly one of CDF and PMF must be provided for '{}'.",
            config.name
        );
    }

    if has_pmf {
        validate_pmf_points(config)
    } else {
        validate_cdf_points(config)
    }
}

fn validate_pmf_points(config: &DistributionConfig) -> Result<()> {
    let total: f64 = config.pmf_points.iter().map(|point| point.pmf).sum();
    if (total - 1.0).abs() > MASS_TOLERANCE {
        bail!(
            "Cumulative value of all PMFs should be 1. It is '{}' instead.",
            total
        );
    }

    let arity = config.pmf_points[0].data_points.len();
    for point in &config.pmf_points {
        if point.data_points.len() != arity {
            bail!("The size of data_points must be same in all PmfPoints.");
        }
    }
    if arity == 0 {
        bail!(
            "At least one data_point must be provided in each PmfPoint of PMF:'{}'.",
            config.name
        );
    }

    for point in &config.pmf_points {
        for data_point in &point.data_points {
            if let DataPoint::Range { lower, upper } = data_point {
                if lower > upper {
                    bail!(
                        "The lower:'{}' must not be greater than upper:'{}' in PMF:'{}'.",
                        lower,
                        upper,
                        config.name
                    );
                }
            }
        }
    }

    Ok(())
}

fn validate_cdf_points(config: &DistributionConfig) -> Result<()> {
    for (i, window) in config.cdf_points.windows(2).enumerate() {
        let (previous, current) = (window[0], window[1]);
        if current.value <= previous.value {
            bail!(
                "The value:'{}' must be greater than previous_value:'{}' at index '{}' in CDF:'{}'.",
                current.value,
                previous.value,
                i + 1,
                config.name
            );
        }
    }

    for (i, window) in config.cdf_points.windows(2).enumerate() {
        let (previous, current) = (window[0], window[1]);
        if current.cdf <= previous.cdf {
            bail!(
                "The cdf value:'{}' must be greater than previous cdf value:'{}' at index '{}' in CDF:'{}'.",
                current.cdf,
                previous.cdf,
                i + 1,
                config.name
            );
        }
    }

    let max_cdf = config.cdf_points[config.cdf_points.len() - 1].cdf;
    if (max_cdf - 1.0).abs() > MASS_TOLERANCE {
        bail!(
            "The maximum value of cdf is '{}' in CDF:'{}'. It must be exactly equal to 1.",
            max_cdf,
            config.name
        );
    }

    Ok(())
}

/// Validate a complete workload description
///
/// Checks every distribution declaration, then verifies that the service,
/// distribution, and driver-option names referenced across the workload all
/// resolve.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.services.is_empty() {
        bail!("At least one service must be specified");
    }

    let mut distribution_names = HashSet::new();
    for distribution in &config.distributions {
        if !distribution_names.insert(distribution.name.as_str()) {
            bail!("Duplicate distribution name '{}'", distribution.name);
        }
        validate_distribution_config(distribution)?;
    }

    let service_names: HashSet<&str> =
        config.services.iter().map(|s| s.name.as_str()).collect();
    let option_names: HashSet<&str> =
        config.driver_options.iter().map(|o| o.name.as_str()).collect();

    for service in &config.services {
        if service.count == 0 {
            bail!("Service '{}' must have at least one instance", service.name);
        }
        if let Some(options_name) = &service.protocol_driver_options_name {
            if !option_names.contains(options_name.as_str()) {
                bail!(
                    "Service '{}' references unknown driver options '{}'",
                    service.name,
                    options_name
                );
            }
        }
    }

    for rpc in &config.rpcs {
        if !service_names.contains(rpc.client.as_str()) {
            bail!("RPC '{}' references unknown client service '{}'", rpc.name, rpc.client);
        }
        if !service_names.contains(rpc.server.as_str()) {
            bail!("RPC '{}' references unknown server service '{}'", rpc.name, rpc.server);
        }
        if !distribution_names.contains(rpc.request_payload_name.as_str()) {
            bail!(
                "RPC '{}' references unknown distribution '{}'",
                rpc.name,
                rpc.request_payload_name
            );
        }
        if let Some(interval_name) = &rpc.interval_name {
            if !distribution_names.contains(interval_name.as_str()) {
                bail!(
                    "RPC '{}' references unknown distribution '{}'",
                    rpc.name,
                    interval_name
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::distribution::{CdfPoint, PmfPoint};
    use crate::config::workload::{RpcSpec, ServiceSpec};

    fn named_config(name: &str) -> DistributionConfig {
        DistributionConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn exact_pmf_point(pmf: f64, exact: i64) -> PmfPoint {
        PmfPoint {
            pmf,
            data_points: vec![DataPoint::Exact { exact }],
        }
    }

    #[test]
    fn test_no_mode_config() {
        let config = named_config("MyReqPayloadDC");
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Exactly one of CDF and PMF must be provided for 'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_both_mode_config() {
        let mut config = named_config("MyReqPayloadDC");
        config.pmf_points.push(exact_pmf_point(1.0, 10));
        config.cdf_points.push(CdfPoint { value: 10, cdf: 1.0 });
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Exactly one of CDF and PMF must be provided for 'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_valid_pmf_config() {
        let mut config = named_config("MyReqPayloadDC");
        for i in 1..5 {
            config.pmf_points.push(exact_pmf_point(i as f64 / 10.0, i));
        }
        assert!(validate_distribution_config(&config).is_ok());
    }

    #[test]
    fn test_pmf_mass_not_closing() {
        let mut config = named_config("MyReqPayloadDC");
        for i in 1..5 {
            config.pmf_points.push(exact_pmf_point(i as f64 / 20.0, i));
        }
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cumulative value of all PMFs should be 1. It is '0.5' instead."
        );
    }

    #[test]
    fn test_pmf_mass_within_tolerance() {
        // Masses sum to 1.0000 only after rounding; the closure check must
        // absorb that drift.
        let mut config = named_config("MyReqPayloadDC");
        config.pmf_points.push(exact_pmf_point(0.3333, 1));
        config.pmf_points.push(exact_pmf_point(0.3333, 2));
        config.pmf_points.push(exact_pmf_point(0.3334, 3));
        assert!(validate_distribution_config(&config).is_ok());
    }

    #[test]
    fn test_pmf_arity_mismatch() {
        let mut config = named_config("MyReqPayloadDC");
        config.pmf_points.push(PmfPoint {
            pmf: 0.1,
            data_points: vec![
                DataPoint::Exact { exact: 10 },
                DataPoint::Exact { exact: 100 },
            ],
        });
        config.pmf_points.push(exact_pmf_point(0.9, 90));
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The size of data_points must be same in all PmfPoints."
        );
    }

    #[test]
    fn test_pmf_point_without_data_points() {
        let mut config = named_config("MyReqPayloadDC");
        config.pmf_points.push(PmfPoint {
            pmf: 1.0,
            data_points: vec![],
        });
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one data_point must be provided in each PmfPoint of PMF:'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_pmf_inverted_range() {
        let mut config = named_config("MyReqPayloadDC");
        config.pmf_points.push(PmfPoint {
            pmf: 1.0,
            data_points: vec![DataPoint::Range { lower: 20, upper: 10 }],
        });
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The lower:'20' must not be greater than upper:'10' in PMF:'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_valid_cdf_config() {
        let mut config = named_config("MyReqPayloadDC");
        let mut cdf = 0.0;
        for i in 1..5 {
            cdf += i as f64 / 10.0;
            config.cdf_points.push(CdfPoint { value: i, cdf });
        }
        assert!(validate_distribution_config(&config).is_ok());
    }

    #[test]
    fn test_cdf_non_monotonic_values() {
        let mut config = named_config("MyReqPayloadDC");
        let mut cdf = 0.0;
        for i in 1..5 {
            cdf += i as f64 / 20.0;
            config.cdf_points.push(CdfPoint {
                value: 100 - 10 * i,
                cdf,
            });
        }
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value:'80' must be greater than previous_value:'90' at index '1' in CDF:'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_cdf_non_monotonic_cdf() {
        let mut config = named_config("MyReqPayloadDC");
        config.cdf_points.push(CdfPoint { value: 1, cdf: 0.5 });
        config.cdf_points.push(CdfPoint { value: 2, cdf: 0.25 });
        config.cdf_points.push(CdfPoint { value: 3, cdf: 1.0 });
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The cdf value:'0.25' must be greater than previous cdf value:'0.5' at index '1' in CDF:'MyReqPayloadDC'."
        );
    }

    #[test]
    fn test_cdf_max_not_one() {
        let mut config = named_config("MyReqPayloadDC");
        let mut cdf = 0.0;
        for i in 1..5 {
            cdf += i as f64 / 100.0;
            config.cdf_points.push(CdfPoint { value: i, cdf });
        }
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The maximum value of cdf is '0.1' in CDF:'MyReqPayloadDC'. It must be exactly equal to 1."
        );
    }

    #[test]
    fn test_cdf_value_check_precedes_cdf_check() {
        // Both the values and the cdf column are broken; the value diagnostic
        // wins because it is checked first.
        let mut config = named_config("MyReqPayloadDC");
        config.cdf_points.push(CdfPoint { value: 9, cdf: 0.5 });
        config.cdf_points.push(CdfPoint { value: 9, cdf: 0.25 });
        let err = validate_distribution_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value:'9' must be greater than previous_value:'9' at index '1' in CDF:'MyReqPayloadDC'."
        );
    }

    fn minimal_workload() -> Config {
        let mut payload = named_config("payload");
        payload.pmf_points.push(exact_pmf_point(1.0, 128));
        Config {
            services: vec![
                ServiceSpec {
                    name: "client".to_string(),
                    count: 1,
                    protocol_driver_options_name: None,
                },
                ServiceSpec {
                    name: "server".to_string(),
                    count: 2,
                    protocol_driver_options_name: None,
                },
            ],
            rpcs: vec![RpcSpec {
                name: "query".to_string(),
                client: "client".to_string(),
                server: "server".to_string(),
                request_payload_name: "payload".to_string(),
                interval_name: None,
            }],
            distributions: vec![payload],
            driver_options: vec![],
        }
    }

    #[test]
    fn test_validate_config_ok() {
        assert!(validate_config(&minimal_workload()).is_ok());
    }

    #[test]
    fn test_validate_config_unknown_service() {
        let mut config = minimal_workload();
        config.rpcs[0].server = "backend".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_unknown_distribution() {
        let mut config = minimal_workload();
        config.rpcs[0].request_payload_name = "missing".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_duplicate_distribution() {
        let mut config = minimal_workload();
        let duplicate = config.distributions[0].clone();
        config.distributions.push(duplicate);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_bad_distribution_propagates() {
        let mut config = minimal_workload();
        config.distributions[0].pmf_points[0].pmf = 0.5;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cumulative value of all PMFs should be 1. It is '0.5' instead."
        );
    }
}
