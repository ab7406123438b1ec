//! Resource utilization tracking
//!
//! This module provides process CPU, memory, page-fault, and context-switch
//! tracking for a simulation run. It reads from /proc/self/stat and
//! /proc/self/status on Linux; on other platforms snapshots are unavailable
//! and callers degrade gracefully.

use std::fs;
use std::time::Instant;

/// Resource utilization snapshot
#[derive(Debug, Clone, Copy)]
pub struct ResourceSnapshot {
    /// CPU time in user mode (microseconds)
    pub cpu_user_us: u64,
    /// CPU time in kernel mode (microseconds)
    pub cpu_system_us: u64,
    /// Peak Resident Set Size (VmHWM) in bytes
    pub max_rss_bytes: u64,
    /// Minor page faults since process start
    pub minor_faults: u64,
    /// Major page faults since process start
    pub major_faults: u64,
    /// Voluntary context switches since process start
    pub voluntary_ctx_switches: u64,
    /// Involuntary context switches since process start
    pub involuntary_ctx_switches: u64,
    /// Wall-clock time when snapshot was taken
    pub timestamp: Instant,
}

/// Resource usage between two snapshots
#[derive(Debug, Clone, Copy)]
pub struct ResourceUsage {
    /// User CPU time consumed (microseconds)
    pub cpu_user_us: u64,
    /// Kernel CPU time consumed (microseconds)
    pub cpu_system_us: u64,
    /// CPU utilization percentage (0.0 - 100.0 * num_cores)
    pub cpu_percent: f64,
    /// Peak Resident Set Size over the interval in bytes
    pub max_rss_bytes: u64,
    /// Minor page faults over the interval
    pub minor_faults: u64,
    /// Major page faults over the interval
    pub major_faults: u64,
    /// Voluntary context switches over the interval
    pub voluntary_ctx_switches: u64,
    /// Involuntary context switches over the interval
    pub involuntary_ctx_switches: u64,
}

impl ResourceSnapshot {
    /// Take a snapshot of current resource utilization
    ///
    /// Returns None if unable to read proc files (e.g., on non-Linux
    /// systems).
    pub fn take() -> Option<Self> {
        let (cpu_user_us, cpu_system_us, minor_faults, major_faults) = Self::read_stat()?;
        let (max_rss_bytes, voluntary_ctx_switches, involuntary_ctx_switches) =
            Self::read_status()?;

        Some(Self {
            cpu_user_us,
            cpu_system_us,
            max_rss_bytes,
            minor_faults,
            major_faults,
            voluntary_ctx_switches,
            involuntary_ctx_switches,
            timestamp: Instant::now(),
        })
    }

    /// Get the number of CPU cores on the system
    pub fn num_cpus() -> Option<usize> {
        if let Ok(cpuinfo) = fs::read_to_string("/proc/cpuinfo") {
            let count = cpuinfo
                .lines()
                .filter(|line| line.starts_with("processor"))
                .count();
            if count > 0 {
                return Some(count);
            }
        }

        // Fallback: use num_cpus crate (works cross-platform)
        Some(num_cpus::get())
    }

    /// Read CPU time and page faults from /proc/self/stat
    ///
    /// Returns (utime_us, stime_us, minflt, majflt) or None on error.
    fn read_stat() -> Option<(u64, u64, u64, u64)> {
        let stat = fs::read_to_string("/proc/self/stat").ok()?;

        // /proc/self/stat format:
        // pid (comm) state ppid pgrp session tty_nr tpgid flags minflt
        // cminflt majflt cmajflt utime stime ...
        // The comm field may contain spaces; skip past the closing paren.
        let after_comm = stat.get(stat.rfind(')')? + 2..)?;
        let fields: Vec<&str> = after_comm.split_whitespace().collect();
        if fields.len() < 13 {
            return None;
        }

        // Relative to the field after comm: state=0, minflt=7, majflt=9,
        // utime=11, stime=12. The times are in clock ticks.
        let minflt: u64 = fields[7].parse().ok()?;
        let majflt: u64 = fields[9].parse().ok()?;
        let utime_ticks: u64 = fields[11].parse().ok()?;
        let stime_ticks: u64 = fields[12].parse().ok()?;

        // Clock ticks per second is typically 100 (USER_HZ)
        let ticks_per_sec = 100;
        let utime_us = (utime_ticks * 1_000_000) / ticks_per_sec;
        let stime_us = (stime_ticks * 1_000_000) / ticks_per_sec;

        Some((utime_us, stime_us, minflt, majflt))
    }

    /// Read peak memory and context switches from /proc/self/status
    ///
    /// Returns (max_rss_bytes, voluntary, involuntary) or None on error.
    fn read_status() -> Option<(u64, u64, u64)> {
        let status = fs::read_to_string("/proc/self/status").ok()?;

        let mut hwm_kb = None;
        let mut voluntary = None;
        let mut involuntary = None;

        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmHWM:") {
                hwm_kb = rest.split_whitespace().next()?.parse::<u64>().ok();
            } else if let Some(rest) = line.strip_prefix("voluntary_ctxt_switches:") {
                voluntary = rest.trim().parse::<u64>().ok();
            } else if let Some(rest) = line.strip_prefix("nonvoluntary_ctxt_switches:") {
                involuntary = rest.trim().parse::<u64>().ok();
            }
        }

        Some((hwm_kb? * 1024, voluntary?, involuntary?))
    }

    /// Calculate CPU utilization between two snapshots
    ///
    /// Returns CPU percentage (0.0 - 100.0 * num_cores). For example, 150.0
    /// means 1.5 cores worth of CPU time.
    pub fn cpu_percent_since(&self, earlier: &ResourceSnapshot) -> f64 {
        let wall_time_us = self
            .timestamp
            .duration_since(earlier.timestamp)
            .as_micros() as u64;
        if wall_time_us == 0 {
            return 0.0;
        }

        let cpu_time_us = (self.cpu_user_us + self.cpu_system_us)
            .saturating_sub(earlier.cpu_user_us + earlier.cpu_system_us);

        (cpu_time_us as f64 / wall_time_us as f64) * 100.0
    }

    /// Compute the resource usage between an earlier snapshot and this one
    ///
    /// Monotonic counters are differenced; peak RSS is carried from the
    /// later snapshot since the kernel reports a process-lifetime high
    /// water mark.
    pub fn usage_since(&self, earlier: &ResourceSnapshot) -> ResourceUsage {
        ResourceUsage {
            cpu_user_us: self.cpu_user_us.saturating_sub(earlier.cpu_user_us),
            cpu_system_us: self.cpu_system_us.saturating_sub(earlier.cpu_system_us),
            cpu_percent: self.cpu_percent_since(earlier),
            max_rss_bytes: self.max_rss_bytes,
            minor_faults: self.minor_faults.saturating_sub(earlier.minor_faults),
            major_faults: self.major_faults.saturating_sub(earlier.major_faults),
            voluntary_ctx_switches: self
                .voluntary_ctx_switches
                .saturating_sub(earlier.voluntary_ctx_switches),
            involuntary_ctx_switches: self
                .involuntary_ctx_switches
                .saturating_sub(earlier.involuntary_ctx_switches),
        }
    }
}

impl std::fmt::Display for ResourceUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cpu: {:.1}% (user {}us, system {}us) peak rss: {} KiB faults: {} minor / {} major ctx switches: {} voluntary / {} involuntary",
            self.cpu_percent,
            self.cpu_user_us,
            self.cpu_system_us,
            self.max_rss_bytes / 1024,
            self.minor_faults,
            self.major_faults,
            self.voluntary_ctx_switches,
            self.involuntary_ctx_switches,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_resource_snapshot() {
        // This test only works on Linux
        if let Some(snapshot) = ResourceSnapshot::take() {
            assert!(snapshot.max_rss_bytes > 0);
        }
    }

    #[test]
    fn test_usage_since() {
        if let Some(start) = ResourceSnapshot::take() {
            // Do some CPU work
            let mut sum = 0u64;
            for i in 0..1_000_000 {
                sum = sum.wrapping_add(i);
            }

            thread::sleep(Duration::from_millis(10));

            if let Some(end) = ResourceSnapshot::take() {
                let usage = end.usage_since(&start);
                assert!(usage.cpu_percent >= 0.0);
                assert!(usage.max_rss_bytes > 0);

                // Prevent optimization
                assert!(sum > 0);
            }
        }
    }

    #[test]
    fn test_usage_counters_are_monotonic_deltas() {
        if let (Some(start), Some(end)) = (ResourceSnapshot::take(), ResourceSnapshot::take()) {
            let usage = end.usage_since(&start);
            assert!(usage.cpu_user_us <= end.cpu_user_us);
            assert!(usage.voluntary_ctx_switches <= end.voluntary_ctx_switches);
        }
    }

    #[test]
    fn test_num_cpus() {
        let cpus = ResourceSnapshot::num_cpus().unwrap();
        assert!(cpus >= 1);
    }

    #[test]
    fn test_display_shape() {
        let usage = ResourceUsage {
            cpu_user_us: 1000,
            cpu_system_us: 500,
            cpu_percent: 42.5,
            max_rss_bytes: 2048 * 1024,
            minor_faults: 10,
            major_faults: 1,
            voluntary_ctx_switches: 3,
            involuntary_ctx_switches: 2,
        };
        let rendered = usage.to_string();
        assert!(rendered.contains("cpu: 42.5%"));
        assert!(rendered.contains("peak rss: 2048 KiB"));
    }
}
