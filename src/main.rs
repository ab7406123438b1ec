//! RpcPulse CLI entry point

use anyhow::{bail, Context, Result};
use rpcpulse::config::cli::Cli;
use rpcpulse::config::settings::get_int_setting;
use rpcpulse::config::{validator, Config, DistributionConfig, RpcSpec};
use rpcpulse::distribution::{allocate_sample_generator, allocate_sample_generator_with_seed};
use rpcpulse::stats::{self, SampleHistogram};
use rpcpulse::system;
use rpcpulse::util::resource::ResourceSnapshot;
use rpcpulse::worker::ThreadPool;
use std::sync::mpsc;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    println!("RpcPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Distributed RPC workload modeling and profiling tool");
    println!();

    if cli.reps == 0 {
        bail!("--reps must be at least 1");
    }

    let load_start = Instant::now();
    let config = rpcpulse::config::toml::parse_toml_file(&cli.workload)?;
    validator::validate_config(&config).context("Workload validation failed")?;
    if cli.debug {
        eprintln!(
            "DEBUG TIMING: Workload load: {:.3}s",
            load_start.elapsed().as_secs_f64()
        );
    }

    print_workload(&config);

    if cli.validate_only {
        println!();
        println!("Validate-only mode - workload validated successfully");
        return Ok(());
    }

    println!();
    println!("Simulating {} draws per distribution...", cli.reps);
    println!();

    let start_snapshot = ResourceSnapshot::take();
    let run_start = Instant::now();

    for rpc in &config.rpcs {
        simulate_rpc(&config, rpc, &cli)?;
    }

    println!("Total wall time: {:.3}s", run_start.elapsed().as_secs_f64());
    if let (Some(start), Some(end)) = (start_snapshot, ResourceSnapshot::take()) {
        println!("Resource usage: {}", end.usage_since(&start));
    }

    Ok(())
}

/// Display the loaded workload description
fn print_workload(config: &Config) {
    let instance_ids = system::enumerate_service_instance_ids(config);
    println!("Services ({} instances total):", instance_ids.len());
    for service in &config.services {
        println!("  {} x{}", service.name, service.count);
    }

    if !config.rpcs.is_empty() {
        println!("RPCs:");
        for rpc in &config.rpcs {
            println!(
                "  {} ({} -> {}), request payload '{}'",
                rpc.name, rpc.client, rpc.server, rpc.request_payload_name
            );
        }
    }
}

/// Per-worker simulation output
struct WorkerReport {
    latency: SampleHistogram,
    dimensions: Vec<Vec<i64>>,
}

/// Simulate one RPC: draw its payload (and interval) populations and print
/// their summaries
fn simulate_rpc(config: &Config, rpc: &RpcSpec, cli: &Cli) -> Result<()> {
    println!("{} ({} -> {}):", rpc.name, rpc.client, rpc.server);

    let mut targets = vec![("request payload", rpc.request_payload_name.as_str())];
    if let Some(interval_name) = &rpc.interval_name {
        targets.push(("interval", interval_name.as_str()));
    }

    let threads = pool_size_for(config, rpc, cli)?;
    for (label, distribution_name) in targets {
        // Validated up front, so the name always resolves.
        let distribution = config
            .find_distribution(distribution_name)
            .with_context(|| format!("Unknown distribution '{}'", distribution_name))?;

        let sim_start = Instant::now();
        let (mut dimensions, latency) = simulate_distribution(distribution, threads, cli)?;
        if cli.debug {
            eprintln!(
                "DEBUG TIMING: {} '{}': {:.3}s on {} threads",
                label,
                distribution_name,
                sim_start.elapsed().as_secs_f64(),
                threads
            );
        }

        for (dim, values) in dimensions.iter_mut().enumerate() {
            println!("  {} var{}: {}", label, dim, stats::summarize_values(values)?);
        }
        if let Some(summary) = latency.summary() {
            println!("  {} draw latency: {}", label, summary);
        }
    }

    Ok(())
}

/// Draw `cli.reps` samples from a distribution across a worker pool
///
/// Each worker owns its own generator; with `--seed` the workers get
/// distinct derived seeds so their streams stay uncorrelated while the run
/// as a whole remains reproducible.
fn simulate_distribution(
    distribution: &DistributionConfig,
    threads: usize,
    cli: &Cli,
) -> Result<(Vec<Vec<i64>>, SampleHistogram)> {
    let pool = ThreadPool::new(threads);
    let (tx, rx) = mpsc::channel::<Result<WorkerReport>>();

    let base = cli.reps / pool.size();
    let remainder = cli.reps % pool.size();
    for worker in 0..pool.size() {
        let reps = base + usize::from(worker < remainder);
        if reps == 0 {
            continue;
        }
        let tx = tx.clone();
        let distribution = distribution.clone();
        let seed = cli.seed.map(|seed| seed.wrapping_add(worker as u64));
        pool.execute(move || {
            let _ = tx.send(draw_samples(&distribution, reps, seed));
        });
    }
    drop(tx);

    let mut latency = SampleHistogram::new()?;
    let mut dimensions: Vec<Vec<i64>> = Vec::new();
    for report in rx {
        let report = report?;
        latency.merge(&report.latency)?;
        if dimensions.is_empty() {
            dimensions = report.dimensions;
        } else {
            for (merged, part) in dimensions.iter_mut().zip(report.dimensions) {
                merged.extend(part);
            }
        }
    }

    Ok((dimensions, latency))
}

/// Worker body: allocate a generator and draw `reps` samples
fn draw_samples(
    distribution: &DistributionConfig,
    reps: usize,
    seed: Option<u64>,
) -> Result<WorkerReport> {
    let mut generator = match seed {
        Some(seed) => allocate_sample_generator_with_seed(distribution, seed)?,
        None => allocate_sample_generator(distribution)?,
    };

    let mut latency = SampleHistogram::new()?;
    let mut dimensions: Vec<Vec<i64>> = (0..generator.arity())
        .map(|_| Vec::with_capacity(reps))
        .collect();
    for _ in 0..reps {
        let start = Instant::now();
        let sample = generator.random_sample();
        latency.record(start.elapsed().as_nanos() as u64);
        for (dim, value) in sample.into_iter().enumerate() {
            dimensions[dim].push(value);
        }
    }

    Ok(WorkerReport { latency, dimensions })
}

/// Worker pool size for an RPC simulation
///
/// `--threads` wins; otherwise the server's `threadpool_size` driver
/// setting applies, defaulting to a single worker.
fn pool_size_for(config: &Config, rpc: &RpcSpec, cli: &Cli) -> Result<usize> {
    if let Some(threads) = cli.threads {
        return Ok(threads.max(1));
    }

    let server = system::get_service_spec(&rpc.server, config)?;
    if let Some(options_name) = &server.protocol_driver_options_name {
        if let Some(options) = config.find_driver_options(options_name) {
            let size = get_int_setting(&options.settings, "threadpool_size", 1)?;
            return Ok(size.max(1) as usize);
        }
    }
    Ok(1)
}
