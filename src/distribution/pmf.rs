//! PMF sample generator
//!
//! Draws a categorical index over the declared points using a precomputed
//! cumulative table, then draws each dimension of the selected point:
//! exact values pass through, ranges are sampled uniformly. All dimensions
//! of one sample come from the same point, so co-occurrence declared in the
//! config is preserved.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{bucket_index, SampleGenerator};
use crate::config::{DataPoint, DistributionConfig};

/// Multi-dimensional categorical generator over PMF points
///
/// The cumulative table is normalized at construction so its final entry is
/// exactly 1.0, which keeps every point reachable under the strict
/// `u < C[k]` bucket selection.
pub struct PmfSampleGenerator {
    /// Cumulative point masses, final entry exactly 1.0
    cumulative: Vec<f64>,

    /// Per-point dimension descriptors
    points: Vec<Vec<DataPoint>>,

    /// Common data-point count of all points
    arity: usize,

    /// Random number generator
    rng: Xoshiro256PlusPlus,
}

impl PmfSampleGenerator {
    /// Create a generator with an entropy-seeded random source
    ///
    /// The config must have passed validation: PMF mode populated, masses
    /// closing at 1, uniform arity, ordered ranges.
    pub fn new(config: &DistributionConfig) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::from_entropy())
    }

    /// Create a generator with a specific seed
    ///
    /// Useful for reproducible runs and statistical tests.
    pub fn with_seed(config: &DistributionConfig, seed: u64) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn with_rng(config: &DistributionConfig, rng: Xoshiro256PlusPlus) -> Self {
        let mut cumulative = Vec::with_capacity(config.pmf_points.len());
        let mut total = 0.0;
        for point in &config.pmf_points {
            total += point.pmf;
            cumulative.push(total);
        }
        // The declared masses close at 1 only within tolerance; dividing by
        // the observed total makes the final entry exactly 1.0.
        for entry in &mut cumulative {
            *entry /= total;
        }

        let points: Vec<Vec<DataPoint>> = config
            .pmf_points
            .iter()
            .map(|point| point.data_points.clone())
            .collect();
        let arity = points.first().map_or(0, |point| point.len());

        Self {
            cumulative,
            points,
            arity,
            rng,
        }
    }
}

impl SampleGenerator for PmfSampleGenerator {
    fn random_sample(&mut self) -> Vec<i64> {
        let u: f64 = self.rng.gen();
        let index = bucket_index(&self.cumulative, u);

        let mut sample = Vec::with_capacity(self.arity);
        for dim in 0..self.arity {
            let value = match self.points[index][dim] {
                DataPoint::Exact { exact } => exact,
                DataPoint::Range { lower, upper } => self.rng.gen_range(lower..=upper),
            };
            sample.push(value);
        }
        sample
    }

    fn arity(&self) -> usize {
        self.arity
    }
}
