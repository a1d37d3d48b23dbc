//! Schelling Sim - Entry Point
//!
//! `schelling run` performs one seeded simulation and prints the result as
//! JSON. `schelling sweep` repeats the simulation over a grid of
//! (similarity_threshold, races) combinations and writes one CSV row per run.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use schelling_sim::core::error::Result;
use schelling_sim::sweep::{run_sweep, summarize, write_csv, SweepConfig};
use schelling_sim::{SimulationConfig, SimulationRunner};

#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Simulate Schelling's model of residential segregation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single simulation
    Run(RunArgs),
    /// Run a parameter sweep and write results as CSV
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// City grid width
    #[arg(long, default_value_t = 50)]
    width: usize,

    /// City grid height
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// Fraction of cells left empty, in [0, 1)
    #[arg(long, default_value_t = 0.2)]
    empty_ratio: f64,

    /// Minimum same-race neighbour fraction an occupant accepts
    #[arg(long, default_value_t = 0.4)]
    similarity_threshold: f64,

    /// Number of races
    #[arg(long, default_value_t = 2)]
    races: u32,

    /// Maximum number of relocations
    #[arg(long, default_value_t = 10_000)]
    update_limit: u64,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Sweep definition (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override trials per combination
    #[arg(long)]
    trials: Option<u32>,

    /// Override base seed
    #[arg(long)]
    seed: Option<u64>,

    /// CSV file for per-run records
    #[arg(long, default_value = "schelling_results.csv")]
    output: PathBuf,

    /// Optional CSV file for per-combination averages
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("schelling_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run(args) => run_single(args),
        Command::Sweep(args) => run_batch(args),
    }
}

fn run_single(args: RunArgs) -> Result<()> {
    let config = SimulationConfig {
        width: args.width,
        height: args.height,
        empty_ratio: args.empty_ratio,
        similarity_threshold: args.similarity_threshold,
        races: args.races,
        update_limit: args.update_limit,
        seed: args.seed,
    };

    let runner = SimulationRunner::new(config)?;
    let (result, outcome) = runner.run_with_outcome()?;
    tracing::info!("Stopped after {} sweeps: {:?}", outcome.sweeps(), outcome);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_batch(args: SweepArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            tracing::warn!("Could not size thread pool to {}: {}", threads, e);
        }
    }

    let records = run_sweep(&config)?;
    write_csv(&args.output, &records)?;
    tracing::info!("Wrote {} records to {}", records.len(), args.output.display());

    if let Some(path) = &args.summary {
        let summary = summarize(&records);
        write_csv(path, &summary)?;
        tracing::info!("Wrote {} summary rows to {}", summary.len(), path.display());
    }

    Ok(())
}
