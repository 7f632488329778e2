//! Parent selection strategies.
//!
//! The default draws parents uniformly: selection pressure then comes only
//! from elitism, which keeps the sorted top of the population alive.
//! Fitness-proportional selection is offered for stronger pressure.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// Fitness is maximized (higher = better).
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Uniform);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Every individual is equally likely, regardless of fitness.
    ///
    /// # Complexity
    /// O(1) per selection
    #[default]
    Uniform,

    /// Roulette wheel: probability proportional to fitness.
    ///
    /// Fitness is strictly positive, so every individual keeps a chance.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    FitnessProportional,
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Uniform => rng.random_range(0..population.len()),
            Selection::FitnessProportional => roulette(population, rng),
        }
    }
}

/// Roulette wheel selection over raw fitness values.
fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let total: f64 = population.iter().map(|ind| ind.fitness().max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, ind) in population.iter().enumerate() {
        cumulative += ind.fitness().max(0.0);
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
