//! CDF uniform-interval sample generator
//!
//! Interprets each CDF step as a uniform distribution over the integers of
//! its interval. Bucket `k >= 1` spans `[value[k-1] + 1, value[k]]`; the
//! first bucket's lower bound is `min(1, value[0])`, so values never fall
//! below the declared range by more than the first interval. Arity is
//! always 1.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{bucket_index, SampleGenerator};
use crate::config::DistributionConfig;

/// One-dimensional generator spreading each CDF bucket uniformly
pub struct CdfUniformSampleGenerator {
    /// Cumulative probabilities as declared, closing at 1 within tolerance
    cumulative: Vec<f64>,

    /// Inclusive `(lower, upper)` interval per bucket
    buckets: Vec<(i64, i64)>,

    /// Random number generator
    rng: Xoshiro256PlusPlus,
}

impl CdfUniformSampleGenerator {
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
        let cumulative: Vec<f64> = config.cdf_points.iter().map(|point| point.cdf).collect();

        let mut buckets = Vec::with_capacity(config.cdf_points.len());
        let mut previous_value: Option<i64> = None;
        for point in &config.cdf_points {
            let lower = match previous_value {
                Some(previous) => previous + 1,
                None => point.value.min(1),
            };
            buckets.push((lower, point.value));
            previous_value = Some(point.value);
        }

        Self {
            cumulative,
            buckets,
            rng,
        }
    }
}

impl SampleGenerator for CdfUniformSampleGenerator {
    fn random_sample(&mut self) -> Vec<i64> {
        let u: f64 = self.rng.gen();
        let index = bucket_index(&self.cumulative, u);
        let (lower, upper) = self.buckets[index];
        vec![self.rng.gen_range(lower..=upper)]
    }

    fn arity(&self) -> usize {
        1
    }
}
