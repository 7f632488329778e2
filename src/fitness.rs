//! Conflict counting and fitness.
//!
//! A schedule is scored by four independent penalty counts:
//!
//! 1. **Clashes**: two classes at the same timeslot sharing a group, a
//!    teacher or an audience
//! 2. **Unqualified teachers**: teacher not eligible for the subject
//! 3. **Unenrolled groups**: group not eligible for the subject
//! 4. **Overtime**: teacher whose summed timeslot values exceed their cap
//!
//! Fitness is `1 / (1 + total)`, so a conflict-free schedule scores exactly
//! `1.0` and every extra conflict lowers the score.
//!
//! The evaluator is always run over the complete gene sequence. Nothing is
//! patched incrementally.

use crate::models::{Assignment, Dataset, Schedule};

/// How a pair of clashing classes contributes to the clash count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClashCounting {
    /// Each clashing pair counts once.
    #[default]
    UnorderedPairs,
    /// Each clashing pair counts twice, once from either side. This is the
    /// scale of the legacy scorer and only matters when comparing scores.
    OrderedPairs,
}

/// Per-category conflict counts of one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflicts {
    pub clashes: usize,
    pub unqualified_teachers: usize,
    pub unenrolled_groups: usize,
    pub overtime: usize,
}

impl Conflicts {
    pub fn total(&self) -> usize {
        self.clashes + self.unqualified_teachers + self.unenrolled_groups + self.overtime
    }

    /// `1 / (1 + total)`.
    pub fn fitness(&self) -> f64 {
        1.0 / (1.0 + self.total() as f64)
    }

    pub fn is_conflict_free(&self) -> bool {
        self.total() == 0
    }
}

/// Scores gene sequences against a [`Dataset`].
///
/// Construction resolves the name-keyed tables into dense lookups indexed by
/// teacher, group and subject position, so evaluation never touches strings.
#[derive(Debug, Clone)]
pub struct ConflictEvaluator {
    subject_count: usize,
    /// `teacher * subject_count + subject`
    qualified: Vec<bool>,
    /// `group * subject_count + subject`
    enrolled: Vec<bool>,
    hour_caps: Vec<Option<u32>>,
    clash_counting: ClashCounting,
}

impl ConflictEvaluator {
    pub fn new(dataset: &Dataset) -> Self {
        let subjects = dataset.subjects();
        let subject_count = subjects.len();

        let eligibility = |listed: Option<&[String]>| -> Vec<bool> {
            subjects
                .iter()
                .map(|s| listed.is_some_and(|l| l.contains(s)))
                .collect()
        };

        let qualified = dataset
            .teachers()
            .iter()
            .flat_map(|t| eligibility(dataset.teacher_subjects(t)))
            .collect();
        let enrolled = dataset
            .groups()
            .iter()
            .flat_map(|g| eligibility(dataset.group_subjects(g)))
            .collect();
        let hour_caps = dataset
            .teachers()
            .iter()
            .map(|t| dataset.teacher_max_hours(t))
            .collect();

        Self {
            subject_count,
            qualified,
            enrolled,
            hour_caps,
            clash_counting: ClashCounting::default(),
        }
    }

    /// Sets the clash counting convention.
    pub fn with_clash_counting(mut self, counting: ClashCounting) -> Self {
        self.clash_counting = counting;
        self
    }

    pub fn clash_counting(&self) -> ClashCounting {
        self.clash_counting
    }

    /// Counts the conflicts of a gene sequence.
    ///
    /// Ids outside the dataset are treated as ineligible and carry no hour
    /// cap.
    pub fn evaluate(&self, genes: &[Assignment]) -> Conflicts {
        Conflicts {
            clashes: self.clashes(genes),
            unqualified_teachers: genes
                .iter()
                .filter(|a| !self.is_qualified(a))
                .count(),
            unenrolled_groups: genes.iter().filter(|a| !self.is_enrolled(a)).count(),
            overtime: self.overtime(genes),
        }
    }

    /// Evaluates `genes` and wraps them into a [`Schedule`].
    ///
    /// `genes` must come from the GA operators, which keep them locus-aligned
    /// and inside the dataset. Outside callers go through
    /// [`TimetableProblem::try_schedule`](crate::ga::TimetableProblem::try_schedule).
    pub(crate) fn schedule(&self, genes: Vec<Assignment>) -> Schedule {
        let conflicts = self.evaluate(&genes);
        Schedule::new(genes, conflicts)
    }

    fn clashes(&self, genes: &[Assignment]) -> usize {
        let mut pairs = 0;
        for (i, a) in genes.iter().enumerate() {
            for b in &genes[i + 1..] {
                if a.timeslot == b.timeslot
                    && (a.group == b.group || a.teacher == b.teacher || a.audience == b.audience)
                {
                    pairs += 1;
                }
            }
        }
        match self.clash_counting {
            ClashCounting::UnorderedPairs => pairs,
            ClashCounting::OrderedPairs => pairs * 2,
        }
    }

    fn is_qualified(&self, a: &Assignment) -> bool {
        self.lookup(&self.qualified, a.teacher.0, a.subject.0)
    }

    fn is_enrolled(&self, a: &Assignment) -> bool {
        self.lookup(&self.enrolled, a.group.0, a.subject.0)
    }

    fn lookup(&self, table: &[bool], row: usize, subject: usize) -> bool {
        subject < self.subject_count
            && table
                .get(row * self.subject_count + subject)
                .copied()
                .unwrap_or(false)
    }

    fn overtime(&self, genes: &[Assignment]) -> usize {
        let mut load = vec![0u64; self.hour_caps.len()];
        for a in genes {
            if let Some(hours) = load.get_mut(a.teacher.0) {
                *hours += u64::from(a.timeslot);
            }
        }
        load.into_iter()
            .zip(self.hour_caps.iter().copied())
            .filter(|&(hours, cap)| cap.is_some_and(|c| hours > u64::from(c)))
            .count()
    }
}
