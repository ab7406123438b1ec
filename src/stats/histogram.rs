//! HdrHistogram-based latency tracking
//!
//! Wraps `hdrhistogram` for per-draw latency recording. Recording is
//! constant-time and the histogram auto-resizes, so worker threads can feed
//! it without bounds bookkeeping.

use anyhow::Context;
use hdrhistogram::Histogram;

use crate::Result;

/// Latency histogram with three significant digits of precision
#[derive(Debug, Clone)]
pub struct SampleHistogram {
    histogram: Histogram<u64>,
}

impl SampleHistogram {
    /// Create an empty auto-resizing histogram
    pub fn new() -> Result<Self> {
        let mut histogram =
            Histogram::<u64>::new(3).context("Failed to create latency histogram")?;
        histogram.auto(true);
        Ok(Self { histogram })
    }

    /// Record a single value
    pub fn record(&mut self, value: u64) {
        self.histogram.saturating_record(value);
    }

    /// Value at the given percentile (0.0 - 100.0), None when empty
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(self.histogram.value_at_percentile(percentile))
    }

    /// Number of recorded values
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    /// Whether the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Smallest recorded value, None when empty
    pub fn min(&self) -> Option<u64> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(self.histogram.min())
    }

    /// Largest recorded value, None when empty
    pub fn max(&self) -> Option<u64> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(self.histogram.max())
    }

    /// Merge another histogram into this one
    pub fn merge(&mut self, other: &SampleHistogram) -> Result<()> {
        self.histogram
            .add(&other.histogram)
            .context("Failed to merge latency histograms")?;
        Ok(())
    }

    /// One-line percentile summary in nanoseconds, None when empty
    pub fn summary(&self) -> Option<String> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(format!(
            "N: {} min: {}ns median: {}ns 90%: {}ns 99%: {}ns 99.9%: {}ns max: {}ns",
            self.histogram.len(),
            self.histogram.min(),
            self.histogram.value_at_percentile(50.0),
            self.histogram.value_at_percentile(90.0),
            self.histogram.value_at_percentile(99.0),
            self.histogram.value_at_percentile(99.9),
            self.histogram.max(),
        ))
    }
}
