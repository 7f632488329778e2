//! Command-line timetable optimizer.
//!
//! Runs the GA on a JSON dataset (or the built-in sample) and prints the
//! best schedule. Progress is logged through `tracing`; set `RUST_LOG` to
//! adjust verbosity.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_timetable::fitness::ClashCounting;
use u_timetable::ga::{GaConfig, Selection, TimetableProblem, TimetableRunner};
use u_timetable::models::Dataset;
use u_timetable::report::{progress_line, ScheduleReport};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionArg {
    Uniform,
    FitnessProportional,
}

#[derive(Parser)]
#[command(name = "timetable", version, about = "Genetic-algorithm class timetabling")]
struct Cli {
    /// Dataset JSON file; the built-in sample is used when omitted.
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    #[arg(short, long, default_value_t = 500)]
    population: usize,

    #[arg(short, long, default_value_t = 50)]
    generations: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "uniform")]
    selection: SelectionArg,

    /// Stop as soon as a conflict-free schedule is found.
    #[arg(long)]
    stop_on_perfect: bool,

    /// Legacy breeding and scoring: trailing-pair mutation, clashes counted
    /// from both sides.
    #[arg(long)]
    legacy: bool,

    /// Print one progress line per generation.
    #[arg(short, long)]
    verbose: bool,
}

/// Filter used when `RUST_LOG` is unset: per-generation progress events.
const DEFAULT_LOG_FILTER: &str = "info";

fn load_dataset(path: Option<&PathBuf>) -> Result<Dataset> {
    let Some(path) = path else {
        return Ok(Dataset::sample());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    let dataset: Dataset = serde_json::from_str(&raw)
        .with_context(|| format!("parsing dataset {}", path.display()))?;
    dataset.validate()?;
    Ok(dataset)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let dataset = load_dataset(cli.dataset.as_ref())?;

    let mut config = if cli.legacy {
        GaConfig::legacy()
    } else {
        GaConfig::default()
    };
    config = config
        .with_population_size(cli.population)
        .with_max_generations(cli.generations)
        .with_stop_on_perfect(cli.stop_on_perfect)
        .with_selection(match cli.selection {
            SelectionArg::Uniform => Selection::Uniform,
            SelectionArg::FitnessProportional => Selection::FitnessProportional,
        });
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let counting = if cli.legacy {
        ClashCounting::OrderedPairs
    } else {
        ClashCounting::UnorderedPairs
    };
    let problem = TimetableProblem::new(&dataset)?.with_clash_counting(counting);

    let verbose = cli.verbose;
    let result = TimetableRunner::run_with_callback(&problem, &config, |stats| {
        if verbose {
            println!("{}", progress_line(stats));
        }
    })?;

    println!("{}", ScheduleReport::new(&dataset, &result.best));
    if let Some(seed) = result.seed {
        println!("Seed: {seed}");
    }
    Ok(())
}
