//! Joint distribution sample generators
//!
//! This module turns a validated [`DistributionConfig`] into a generator
//! emitting independent random samples at high throughput. Three sampling
//! regimes exist:
//!
//! - **PMF**: categorical draw over declared points, then a per-dimension
//!   draw that is either an exact value or uniform within an inclusive range
//! - **CDF point**: categorical draw over CDF buckets, returning the
//!   bucket's declared value
//! - **CDF uniform**: categorical draw over CDF buckets, then a uniform
//!   integer draw within the bucket interval
//!
//! Generators own their cumulative tables and random source; the config may
//! be released as soon as allocation returns.
//!
//! # Thread Safety
//!
//! Generators are `Send` so they can be handed to worker threads, but a
//! single generator must not be driven concurrently. Generators are cheap;
//! each producer thread should own its own.
//!
//! # Example
//!
//! ```
//! use rpcpulse::config::{DataPoint, DistributionConfig, PmfPoint};
//! use rpcpulse::distribution::allocate_sample_generator;
//!
//! let config = DistributionConfig {
//!     name: "intervals".to_string(),
//!     pmf_points: vec![PmfPoint {
//!         pmf: 1.0,
//!         data_points: vec![DataPoint::Range { lower: 50, upper: 100 }],
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut generator = allocate_sample_generator(&config)?;
//! let sample = generator.random_sample();
//! assert_eq!(sample.len(), 1);
//! assert!((50..=100).contains(&sample[0]));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cdf_point;
pub mod cdf_uniform;
pub mod pmf;

use crate::config::validator::validate_distribution_config;
use crate::config::DistributionConfig;
use crate::Result;

pub use cdf_point::CdfPointSampleGenerator;
pub use cdf_uniform::CdfUniformSampleGenerator;
pub use pmf::PmfSampleGenerator;

/// A generator emitting independent random samples of fixed arity
///
/// `random_sample` is infallible and non-blocking, mutating only the
/// internal random source. Samples are independent and identically
/// distributed.
pub trait SampleGenerator: Send {
    /// Draw one sample; the returned vector's length equals [`arity`](Self::arity)
    fn random_sample(&mut self) -> Vec<i64>;

    /// Number of integers in each emitted sample
    fn arity(&self) -> usize;
}

/// Allocate the sample generator matching a distribution declaration
///
/// Validation is re-run defensively, so an invalid config is rejected here
/// even if the caller skipped the validator. The generator's random source
/// is seeded from OS entropy, keeping coexisting generators uncorrelated.
pub fn allocate_sample_generator(
    config: &DistributionConfig,
) -> Result<Box<dyn SampleGenerator>> {
    validate_distribution_config(config)?;

    let generator: Box<dyn SampleGenerator> = if !config.pmf_points.is_empty() {
        Box::new(PmfSampleGenerator::new(config))
    } else if config.is_cdf_uniform {
        Box::new(CdfUniformSampleGenerator::new(config))
    } else {
        Box::new(CdfPointSampleGenerator::new(config))
    };
    Ok(generator)
}

/// Allocate a deterministically seeded sample generator
///
/// Useful for reproducible runs and statistical tests; production paths use
/// [`allocate_sample_generator`].
pub fn allocate_sample_generator_with_seed(
    config: &DistributionConfig,
    seed: u64,
) -> Result<Box<dyn SampleGenerator>> {
    validate_distribution_config(config)?;

    let generator: Box<dyn SampleGenerator> = if !config.pmf_points.is_empty() {
        Box::new(PmfSampleGenerator::with_seed(config, seed))
    } else if config.is_cdf_uniform {
        Box::new(CdfUniformSampleGenerator::with_seed(config, seed))
    } else {
        Box::new(CdfPointSampleGenerator::with_seed(config, seed))
    };
    Ok(generator)
}

/// Find the smallest index whose cumulative mass exceeds `u`
///
/// `u` lies in [0, 1), so with a table closing at 1.0 the final bucket stays
/// reachable and no draw can index past it.
pub(crate) fn bucket_index(cumulative: &[f64], u: f64) -> usize {
    let index = match cumulative.binary_search_by(|&mass| {
        if mass <= u {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        }
    }) {
        Ok(i) => i,
        Err(i) => i,
    };

    // A CDF table may close slightly below 1.0 within tolerance; clamp so
    // such draws land in the final bucket.
    index.min(cumulative.len() - 1)
}
