//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::ConfigError;

/// Which offspring a mutation event may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationPolicy {
    /// Each child produced in the current breeding step is a candidate.
    /// Elites are never mutated.
    #[default]
    PerChild,

    /// The two most recently appended members of the next population are
    /// candidates, whether or not this step produced them. When crossover
    /// did not fire, this can reach earlier children or even elites.
    /// Reproduces the legacy breeding loop.
    TrailingPair,
}

/// Configuration for the timetabling GA.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.max_generations, 50);
/// assert_eq!(config.elite_count(), 125);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::FitnessProportional)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of schedules in the population. At least 4.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the population copied unchanged into the next generation.
    ///
    /// The elite count is `floor(population_size * elite_ratio)`.
    pub elite_ratio: f64,

    /// Probability that a selected pair is recombined.
    ///
    /// Offspring only come from crossover, so this must be at least
    /// [`GaConfig::MIN_CROSSOVER_RATE`].
    pub crossover_rate: f64,

    /// Probability that a breeding step triggers a mutation event.
    pub mutation_event_rate: f64,

    /// Probability that a candidate of a mutation event is mutated.
    pub mutation_rate: f64,

    /// Per-gene redraw probability inside a mutation.
    pub gene_mutation_rate: f64,

    /// Which offspring a mutation event may touch.
    pub mutation_policy: MutationPolicy,

    /// Stop as soon as a conflict-free schedule is found.
    pub stop_on_perfect: bool,

    /// Whether to evaluate the initial population in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results do not depend
    /// on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 50,
            selection: Selection::default(),
            elite_ratio: 0.25,
            crossover_rate: 0.8,
            mutation_event_rate: 0.8,
            mutation_rate: 0.1,
            gene_mutation_rate: 0.1,
            mutation_policy: MutationPolicy::default(),
            stop_on_perfect: false,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Smallest accepted `crossover_rate`.
    ///
    /// A breeding step appends offspring only when crossover fires, so at
    /// this rate a step succeeds once per 100 attempts on average.
    pub const MIN_CROSSOVER_RATE: f64 = 0.01;

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation event rate.
    pub fn with_mutation_event_rate(mut self, rate: f64) -> Self {
        self.mutation_event_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-individual mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_gene_mutation_rate(mut self, rate: f64) -> Self {
        self.gene_mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation policy.
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    /// Enables or disables stopping at fitness 1.0.
    pub fn with_stop_on_perfect(mut self, stop: bool) -> Self {
        self.stop_on_perfect = stop;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset reproducing the legacy breeding loop.
    ///
    /// Same rates as the default, with [`MutationPolicy::TrailingPair`].
    /// Pair it with `ClashCounting::OrderedPairs` on the evaluator to also
    /// reproduce legacy scores.
    pub fn legacy() -> Self {
        Self {
            mutation_policy: MutationPolicy::TrailingPair,
            ..Self::default()
        }
    }

    /// Number of elites carried over each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio).floor() as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 4 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        for (name, value) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_event_rate", self.mutation_event_rate),
            ("mutation_rate", self.mutation_rate),
            ("gene_mutation_rate", self.gene_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.crossover_rate < Self::MIN_CROSSOVER_RATE {
            return Err(ConfigError::NoCrossover(self.crossover_rate));
        }
        let elites = self.elite_count();
        if elites >= self.population_size {
            return Err(ConfigError::EliteFillsPopulation {
                elites,
                population: self.population_size,
            });
        }
        Ok(())
    }
}
