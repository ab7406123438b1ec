//! Empirical distribution configuration
//!
//! A distribution is declared either as a probability mass function (PMF)
//! over possibly multi-dimensional data points, or as a one-dimensional
//! cumulative distribution function (CDF). The declaration is consumed by
//! the sample generator allocator after validation.
//!
//! # Example
//!
//! ```
//! use rpcpulse::config::{DataPoint, DistributionConfig, PmfPoint};
//!
//! // 20% of requests are exactly 10 bytes, 80% land in [10000, 10010].
//! let config = DistributionConfig {
//!     name: "request_payload".to_string(),
//!     pmf_points: vec![
//!         PmfPoint {
//!             pmf: 0.2,
//!             data_points: vec![DataPoint::Exact { exact: 10 }],
//!         },
//!         PmfPoint {
//!             pmf: 0.8,
//!             data_points: vec![DataPoint::Range { lower: 10000, upper: 10010 }],
//!         },
//!     ],
//!     ..Default::default()
//! };
//! assert!(rpcpulse::config::validator::validate_distribution_config(&config).is_ok());
//! ```

use serde::{Deserialize, Serialize};

/// Empirical distribution declaration
///
/// Exactly one of `pmf_points` and `cdf_points` must be populated; the
/// validator enforces this along with mass closure and monotonicity. The
/// `name` is used only in diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Human-readable name, used in diagnostics
    pub name: String,
    /// PMF declaration: (mass, data points) pairs
    #[serde(default)]
    pub pmf_points: Vec<PmfPoint>,
    /// CDF declaration: (value, cumulative probability) pairs
    #[serde(default)]
    pub cdf_points: Vec<CdfPoint>,
    /// CDF mode only: sample uniformly within each bucket interval instead
    /// of returning the bucket's declared value
    #[serde(default)]
    pub is_cdf_uniform: bool,
}

/// A single PMF point: a probability mass and one data point per dimension
///
/// Every PmfPoint within a config must declare the same number of data
/// points; that count is the dimensionality of emitted samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmfPoint {
    /// Probability mass in (0, 1]
    pub pmf: f64,
    /// Per-dimension descriptors, all drawn together for one sample
    pub data_points: Vec<DataPoint>,
}

/// A per-dimension descriptor within a PMF point
///
/// Either an exact integer or an inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    /// A single exact value
    Exact { exact: i64 },
    /// An inclusive integer range, requires `lower <= upper`
    Range { lower: i64, upper: i64 },
}

/// A single CDF point: a value and the cumulative probability at that value
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CdfPoint {
    /// Upper bound of this bucket (inclusive)
    pub value: i64,
    /// Cumulative probability in (0, 1]
    pub cdf: f64,
}
