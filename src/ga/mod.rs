//! Genetic Algorithm for class timetabling.
//!
//! A generational GA over fixed-length, locus-aligned chromosomes: gene `i`
//! of every [`Schedule`](crate::models::Schedule) is the assignment of
//! subject `i`.
//!
//! # Key Types
//!
//! - [`TimetableProblem`]: random initialization, mutation and crossover of
//!   schedules for one dataset
//! - [`GaConfig`]: Algorithm parameters (population size, rates, policies)
//! - [`TimetableRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best schedule found plus per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Generic two-point crossover and gene resampling
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

mod config;
pub mod operators;
mod problem;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, MutationPolicy};
pub use problem::TimetableProblem;
pub use runner::{GaResult, GenerationStats, TimetableRunner};
pub use selection::Selection;
pub use types::Individual;
