//! GA evolutionary loop execution.
//!
//! [`TimetableRunner`] orchestrates the complete evolutionary process:
//! initialization → sort → elitism → selection → crossover → mutation →
//! replacement, for a fixed number of generations.

use rand::Rng;
use tracing::{debug, info};

use super::config::{GaConfig, MutationPolicy};
use super::problem::TimetableProblem;
use crate::error::ConfigError;
use crate::models::Schedule;
use crate::random::{create_rng, resolve_seed};

/// Snapshot of one generation, taken after sorting and before breeding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best fitness seen so far in the run.
    pub best_fitness: f64,
    /// Conflict total of the best schedule so far.
    pub best_conflicts: usize,
    /// Fitness of the top individual of this generation's population.
    pub population_best: f64,
    /// Mean fitness of this generation's population.
    pub mean_fitness: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best schedule found during the entire run.
    pub best: Schedule,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run ended early on a conflict-free schedule.
    pub stopped_early: bool,

    /// Seed the run was started from, when the runner created the RNG.
    pub seed: Option<u64>,

    /// One entry per executed generation.
    pub history: Vec<GenerationStats>,
}

/// Executes the timetabling GA.
///
/// # Usage
///
/// ```
/// use u_timetable::ga::{GaConfig, TimetableProblem, TimetableRunner};
/// use u_timetable::models::Dataset;
///
/// let dataset = Dataset::sample();
/// let problem = TimetableProblem::new(&dataset).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_max_generations(5)
///     .with_seed(42);
///
/// let result = TimetableRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.generations, 5);
/// assert!(result.best_fitness > 0.0 && result.best_fitness <= 1.0);
/// ```
pub struct TimetableRunner;

impl TimetableRunner {
    /// Runs the GA with an RNG seeded from `config.seed`.
    pub fn run(problem: &TimetableProblem<'_>, config: &GaConfig) -> Result<GaResult, ConfigError> {
        Self::run_with_callback(problem, config, |_| {})
    }

    /// Runs the GA, reporting each generation to `on_generation`.
    pub fn run_with_callback<F>(
        problem: &TimetableProblem<'_>,
        config: &GaConfig,
        on_generation: F,
    ) -> Result<GaResult, ConfigError>
    where
        F: FnMut(&GenerationStats),
    {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        info!(seed, "seeding timetable run");
        let mut rng = create_rng(seed);
        let mut result = Self::run_with_rng(problem, config, &mut rng, on_generation)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Runs the GA drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<R, F>(
        problem: &TimetableProblem<'_>,
        config: &GaConfig,
        rng: &mut R,
        mut on_generation: F,
    ) -> Result<GaResult, ConfigError>
    where
        R: Rng,
        F: FnMut(&GenerationStats),
    {
        config.validate()?;

        let size = config.population_size;
        let elite_count = config.elite_count();
        debug!(
            population = size,
            generations = config.max_generations,
            elites = elite_count,
            genes = problem.gene_count(),
            "starting evolution"
        );

        // 1. Initialize population
        let mut population = problem.random_population(size, rng, config.parallel);
        let mut best = population[0].clone();
        let mut history = Vec::with_capacity(config.max_generations);
        let mut stopped_early = false;

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            // Sort by fitness, best first. Stable, so ties keep their order.
            population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

            // Last observed best wins ties.
            let top = &population[0];
            if top.fitness() >= best.fitness() {
                best = top.clone();
            }

            let stats = GenerationStats {
                generation: gen + 1,
                best_fitness: best.fitness(),
                best_conflicts: best.conflicts().total(),
                population_best: top.fitness(),
                mean_fitness: population.iter().map(Schedule::fitness).sum::<f64>() / size as f64,
            };
            info!(
                generation = stats.generation,
                best_fitness = stats.best_fitness,
                conflicts = stats.best_conflicts,
                mean_fitness = stats.mean_fitness,
                "generation evaluated"
            );
            on_generation(&stats);
            history.push(stats);

            if config.stop_on_perfect && best.conflicts().is_conflict_free() {
                info!(generation = gen + 1, "conflict-free schedule found, stopping");
                stopped_early = true;
                break;
            }

            population = breed(problem, config, &population, elite_count, rng);
        }

        info!(
            generations = history.len(),
            best_fitness = best.fitness(),
            conflicts = best.conflicts().total(),
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: history.len(),
            stopped_early,
            seed: None,
            history,
        })
    }
}

/// Builds the next population from a sorted `population`.
fn breed<R: Rng>(
    problem: &TimetableProblem<'_>,
    config: &GaConfig,
    population: &[Schedule],
    elite_count: usize,
    rng: &mut R,
) -> Vec<Schedule> {
    let size = config.population_size;

    // Elite preservation
    let mut next: Vec<Schedule> = Vec::with_capacity(size + 1);
    next.extend_from_slice(&population[..elite_count]);

    while next.len() < size {
        let p1 = config.selection.select(population, rng);
        let p2 = config.selection.select(population, rng);
        let appended_from = next.len();

        // Crossover
        if rng.random_range(0.0..1.0) < config.crossover_rate {
            let (x, y) = problem.crossover(&population[p1], &population[p2], rng);
            next.push(x);
            next.push(y);
        }

        // Mutation
        if rng.random_range(0.0..1.0) < config.mutation_event_rate {
            let candidates = match config.mutation_policy {
                MutationPolicy::PerChild => appended_from..next.len(),
                MutationPolicy::TrailingPair => next.len().saturating_sub(2)..next.len(),
            };
            for i in candidates {
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    next[i] = problem.mutate(&next[i], config.gene_mutation_rate, rng);
                }
            }
        }
    }

    next.truncate(size);
    next
}

// ============================================================================
// Tests
// ============================================================================
