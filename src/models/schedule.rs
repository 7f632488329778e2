//! Genes and chromosomes.

use crate::fitness::Conflicts;
use crate::ga::Individual;

/// Index into [`Dataset::subjects`](super::Dataset::subjects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubjectId(pub usize);

/// Index into [`Dataset::teachers`](super::Dataset::teachers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeacherId(pub usize);

/// Index into [`Dataset::groups`](super::Dataset::groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub usize);

/// Index into [`Dataset::audiences`](super::Dataset::audiences).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudienceId(pub usize);

/// One class: a subject taught by a teacher to a group in an audience at a
/// timeslot.
///
/// Timeslots are 1-based. The timeslot value also serves as the hour weight
/// when summing a teacher's load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub subject: SubjectId,
    pub teacher: TeacherId,
    pub group: GroupId,
    pub timeslot: u32,
    pub audience: AudienceId,
}

/// A candidate timetable: one [`Assignment`] per subject, in subject order.
///
/// The conflict breakdown and fitness are computed once when the schedule is
/// built and cannot drift from the genes: there is no way to change either
/// afterwards. Operators produce new schedules.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    assignments: Vec<Assignment>,
    conflicts: Conflicts,
    fitness: f64,
}

impl Schedule {
    /// Binds genes to their already computed conflicts.
    pub(crate) fn new(assignments: Vec<Assignment>, conflicts: Conflicts) -> Self {
        Self {
            assignments,
            fitness: conflicts.fitness(),
            conflicts,
        }
    }

    /// Genes in locus order; position `i` holds subject `i`.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn conflicts(&self) -> &Conflicts {
        &self.conflicts
    }

    /// `1 / (1 + conflicts)`, in `(0, 1]`.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// True when both schedules carry the same genes.
    pub fn same_genes(&self, other: &Schedule) -> bool {
        self.assignments == other.assignments
    }

    /// Consumes the schedule and returns its genes.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

impl Individual for Schedule {
    fn fitness(&self) -> f64 {
        self.fitness
    }
}
