//! Genetic-algorithm class timetabling.
//!
//! Assigns every subject of a [`Dataset`](models::Dataset) to a teacher, a
//! student group, a timeslot and an audience, searching for the timetable
//! with the fewest conflicts:
//!
//! - **Models** ([`models`]): dataset, assignments (genes) and schedules
//!   (chromosomes with a cached score)
//! - **Fitness** ([`fitness`]): clash, qualification, enrollment and
//!   overtime counts, folded into `1 / (1 + conflicts)`
//! - **Genetic Algorithm** ([`ga`]): random initialization, two-point
//!   crossover, gene-wise mutation, elitism and a fixed generation budget
//! - **Report** ([`report`]): plain-text output of the best schedule
//!
//! All randomness flows through one seedable generator ([`random`]), so a
//! run is reproducible from its seed.
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{GaConfig, TimetableProblem, TimetableRunner};
//! use u_timetable::models::Dataset;
//!
//! let dataset = Dataset::sample();
//! let problem = TimetableProblem::new(&dataset)?;
//! let config = GaConfig::default()
//!     .with_population_size(50)
//!     .with_max_generations(10)
//!     .with_seed(1);
//! let result = TimetableRunner::run(&problem, &config)?;
//! assert_eq!(result.best.len(), 6);
//! # Ok::<(), u_timetable::error::ConfigError>(())
//! ```

pub mod error;
pub mod fitness;
pub mod ga;
pub mod models;
pub mod random;
pub mod report;
