//! CDF point sample generator
//!
//! Each CDF point is treated as a degenerate bucket: a draw selects a
//! bucket by cumulative probability and returns the bucket's declared
//! value. Arity is always 1.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{bucket_index, SampleGenerator};
use crate::config::DistributionConfig;

/// One-dimensional categorical generator over declared CDF values
pub struct CdfPointSampleGenerator {
    /// Cumulative probabilities as declared, closing at 1 within tolerance
    cumulative: Vec<f64>,

    /// Declared bucket values
    values: Vec<i64>,

    /// Random number generator
    rng: Xoshiro256PlusPlus,
}

impl CdfPointSampleGenerator {
    /// Create a generator with an entropy-seeded random source
    ///
    /// The config must have passed validation: CDF mode populated, both
    /// columns strictly increasing, closing at 1.
    pub fn new(config: &DistributionConfig) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::from_entropy())
    }

    /// Create a generator with a specific seed
    pub fn with_seed(config: &DistributionConfig, seed: u64) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn with_rng(config: &DistributionConfig, rng: Xoshiro256PlusPlus) -> Self {
        let cumulative = config.cdf_points.iter().map(|point| point.cdf).collect();
        let values = config.cdf_points.iter().map(|point| point.value).collect();

        Self {
            cumulative,
            values,
            rng,
        }
    }
}

impl SampleGenerator for CdfPointSampleGenerator {
    fn random_sample(&mut self) -> Vec<i64> {
        let u: f64 = self.rng.gen();
        let index = bucket_index(&self.cumulative, u);
        vec![self.values[index]]
    }

    fn arity(&self) -> usize {
        1
    }
}
