//! Statistics collection
//!
//! Percentile summaries over completed sample logs, plus an
//! HdrHistogram-backed recorder for per-draw latency tracking with bounded
//! memory.

pub mod histogram;

pub use histogram::SampleHistogram;

use anyhow::bail;

use crate::Result;

/// Summarize a latency population in nanoseconds
///
/// Sorts the slice, then reports count, min, median, p90, p99, p99.9 and
/// max using direct index percentiles.
pub fn latency_summary(latencies: &mut [u64]) -> Result<String> {
    if latencies.is_empty() {
        bail!("Cannot summarize an empty latency population");
    }
    latencies.sort_unstable();

    let n = latencies.len();
    Ok(format!(
        "N: {} min: {}ns median: {}ns 90%: {}ns 99%: {}ns 99.9%: {}ns max: {}ns",
        n,
        latencies[0],
        latencies[(n as f64 * 0.5) as usize],
        latencies[(n as f64 * 0.9) as usize],
        latencies[(n as f64 * 0.99) as usize],
        latencies[(n as f64 * 0.999) as usize],
        latencies[n - 1],
    ))
}

/// Summarize a raw sample population
///
/// Same percentile shape as [`latency_summary`] but unitless, used to
/// characterize generated payload sizes and intervals.
pub fn summarize_values(values: &mut [i64]) -> Result<String> {
    if values.is_empty() {
        bail!("Cannot summarize an empty sample population");
    }
    values.sort_unstable();

    let n = values.len();
    Ok(format!(
        "N: {} min: {} median: {} 90%: {} 99%: {} 99.9%: {} max: {}",
        n,
        values[0],
        values[(n as f64 * 0.5) as usize],
        values[(n as f64 * 0.9) as usize],
        values[(n as f64 * 0.99) as usize],
        values[(n as f64 * 0.999) as usize],
        values[n - 1],
    ))
}
