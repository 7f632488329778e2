//! Core trait shared by selection and the evolutionary loop.

/// A scored candidate in the GA population.
///
/// Fitness is maximized and lies in `(0, 1]`: `1.0` means no conflicts.
/// Implementors compute the value once and return it unchanged for the
/// lifetime of the individual.
///
/// # Implementing
///
/// ```
/// use u_timetable::ga::Individual;
///
/// #[derive(Clone)]
/// struct Scored {
///     fitness: f64,
/// }
///
/// impl Individual for Scored {
///     fn fitness(&self) -> f64 {
///         self.fitness
///     }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the cached fitness.
    fn fitness(&self) -> f64;
}
