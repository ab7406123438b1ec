//! TOML workload file parsing

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::Config;

/// Parse a TOML workload file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workload file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse workload file: {}", path.display()))
}

/// Parse a TOML workload description from a string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML workload description")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataPoint;

    const SAMPLE_WORKLOAD: &str = r#"
        [[services]]
        name = "load_balancer"

        [[services]]
        name = "root"
        count = 2
        protocol_driver_options_name = "default"

        [[rpcs]]
        name = "query"
        client = "load_balancer"
        server = "root"
        request_payload_name = "query_payload"

        [[distributions]]
        name = "query_payload"
        pmf_points = [
            { pmf = 0.2, data_points = [{ exact = 16 }] },
            { pmf = 0.8, data_points = [{ lower = 128, upper = 256 }] },
        ]

        [[distributions]]
        name = "response_payload"
        is_cdf_uniform = true
        cdf_points = [
            { value = 100, cdf = 0.5 },
            { value = 200, cdf = 1.0 },
        ]

        [[driver_options]]
        name = "default"
        settings = [
            { name = "transport", string_value = "inprocess" },
            { name = "threadpool_size", int_value = 4 },
        ]
    "#;

    #[test]
    fn test_parse_sample_workload() {
        let config = parse_toml_string(SAMPLE_WORKLOAD).unwrap();
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].count, 1);
        assert_eq!(config.services[1].count, 2);
        assert_eq!(config.rpcs.len(), 1);
        assert_eq!(config.distributions.len(), 2);
        assert_eq!(config.driver_options.len(), 1);

        let payload = config.find_distribution("query_payload").unwrap();
        assert_eq!(payload.pmf_points.len(), 2);
        assert_eq!(
            payload.pmf_points[0].data_points[0],
            DataPoint::Exact { exact: 16 }
        );
        assert_eq!(
            payload.pmf_points[1].data_points[0],
            DataPoint::Range { lower: 128, upper: 256 }
        );

        let response = config.find_distribution("response_payload").unwrap();
        assert!(response.is_cdf_uniform);
        assert_eq!(response.cdf_points.len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_toml_string("not a workload").is_err());
    }

    #[test]
    fn test_driver_options_lookup() {
        let config = parse_toml_string(SAMPLE_WORKLOAD).unwrap();
        let options = config.find_driver_options("default").unwrap();
        assert_eq!(options.settings.len(), 2);
        assert!(config.find_driver_options("missing").is_none());
    }
}
