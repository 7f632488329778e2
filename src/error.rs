//! Configuration and gene validation errors.
//!
//! Every configuration check runs before the first population is drawn. A
//! run either starts with a consistent dataset and configuration or does
//! not start. Gene sequences supplied from outside the GA are checked
//! against the dataset before they become a [`Schedule`](crate::models::Schedule).

use thiserror::Error;

/// Which draw pool of the dataset is affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Teachers,
    Groups,
    Audiences,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pool::Teachers => "teacher",
            Pool::Groups => "group",
            Pool::Audiences => "audience",
        };
        f.write_str(name)
    }
}

/// Invalid dataset or run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least 4, got {0}")]
    PopulationTooSmall(usize),

    #[error("max_generations must be at least 1")]
    NoGenerations,

    #[error("at least 3 subjects are required for two-point crossover, got {0}")]
    TooFewSubjects(usize),

    #[error("{0} list must not be empty")]
    EmptyPool(Pool),

    #[error("classes_per_day must be at least 1")]
    NoTimeslots,

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error(
        "crossover_rate must be at least {min}, got {0}: offspring are only produced by crossover",
        min = crate::ga::GaConfig::MIN_CROSSOVER_RATE
    )]
    NoCrossover(f64),

    #[error("elite_ratio too high: {elites} elites fill a population of {population}")]
    EliteFillsPopulation { elites: usize, population: usize },
}

/// A gene sequence that does not describe a schedule of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneError {
    #[error("expected one gene per subject ({expected}), got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("gene {locus} holds subject {subject}; genes must follow subject order")]
    Misaligned { locus: usize, subject: usize },

    #[error("gene {locus}: {pool} {id} is not in the dataset")]
    UnknownId { locus: usize, pool: Pool, id: usize },

    #[error("gene {locus}: timeslot {timeslot} is outside 1..={classes_per_day}")]
    TimeslotOutOfRange {
        locus: usize,
        timeslot: u32,
        classes_per_day: u32,
    },
}
