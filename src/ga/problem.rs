//! Timetabling GA problem definition.
//!
//! Bridges the domain model ([`Dataset`], [`Schedule`]) to the generic
//! operators: random initialization, gene-wise mutation and two-point
//! crossover. Every operator returns freshly evaluated schedules.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::operators::{resample_genes, two_point_crossover};
use crate::error::{ConfigError, GeneError, Pool};
use crate::fitness::{ClashCounting, ConflictEvaluator};
use crate::models::{Assignment, AudienceId, Dataset, GroupId, Schedule, SubjectId, TeacherId};

/// GA problem definition for class timetabling.
///
/// Borrows the dataset for the whole run and owns the compiled
/// [`ConflictEvaluator`].
///
/// # Example
///
/// ```
/// use u_timetable::ga::TimetableProblem;
/// use u_timetable::models::Dataset;
/// use u_timetable::random::create_rng;
///
/// let dataset = Dataset::sample();
/// let problem = TimetableProblem::new(&dataset).unwrap();
/// let mut rng = create_rng(42);
///
/// let schedule = problem.random_schedule(&mut rng);
/// assert_eq!(schedule.len(), dataset.subjects().len());
/// assert!(schedule.fitness() > 0.0 && schedule.fitness() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    dataset: &'a Dataset,
    evaluator: ConflictEvaluator,
}

impl<'a> TimetableProblem<'a> {
    /// Validates the dataset and compiles its constraint tables.
    pub fn new(dataset: &'a Dataset) -> Result<Self, ConfigError> {
        dataset.validate()?;
        Ok(Self {
            dataset,
            evaluator: ConflictEvaluator::new(dataset),
        })
    }

    /// Sets how clashing pairs are counted.
    pub fn with_clash_counting(mut self, counting: ClashCounting) -> Self {
        self.evaluator = self.evaluator.with_clash_counting(counting);
        self
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn evaluator(&self) -> &ConflictEvaluator {
        &self.evaluator
    }

    /// Number of genes per schedule.
    pub fn gene_count(&self) -> usize {
        self.dataset.subjects().len()
    }

    /// Evaluates operator output into a schedule.
    pub(crate) fn schedule(&self, genes: Vec<Assignment>) -> Schedule {
        self.evaluator.schedule(genes)
    }

    /// Checks an externally built gene sequence and evaluates it.
    ///
    /// The sequence must hold one gene per subject in subject order, with
    /// every id inside the dataset and every timeslot in
    /// `1..=classes_per_day`. Only such schedules can be bred by
    /// [`crossover`](Self::crossover) or printed by
    /// [`ScheduleReport`](crate::report::ScheduleReport).
    pub fn try_schedule(&self, genes: Vec<Assignment>) -> Result<Schedule, GeneError> {
        let d = self.dataset;
        if genes.len() != self.gene_count() {
            return Err(GeneError::WrongLength {
                expected: self.gene_count(),
                found: genes.len(),
            });
        }
        for (locus, a) in genes.iter().enumerate() {
            if a.subject.0 != locus {
                return Err(GeneError::Misaligned {
                    locus,
                    subject: a.subject.0,
                });
            }
            for (pool, id, len) in [
                (Pool::Teachers, a.teacher.0, d.teachers().len()),
                (Pool::Groups, a.group.0, d.groups().len()),
                (Pool::Audiences, a.audience.0, d.audiences().len()),
            ] {
                if id >= len {
                    return Err(GeneError::UnknownId { locus, pool, id });
                }
            }
            if !(1..=d.classes_per_day()).contains(&a.timeslot) {
                return Err(GeneError::TimeslotOutOfRange {
                    locus,
                    timeslot: a.timeslot,
                    classes_per_day: d.classes_per_day(),
                });
            }
        }
        Ok(self.schedule(genes))
    }

    /// Draws a uniform teacher, group, timeslot and audience for `subject`.
    ///
    /// Eligibility is ignored; invalid combinations are left to the
    /// fitness function.
    pub fn random_assignment<R: Rng>(&self, subject: SubjectId, rng: &mut R) -> Assignment {
        let d = self.dataset;
        Assignment {
            subject,
            teacher: TeacherId(rng.random_range(0..d.teachers().len())),
            group: GroupId(rng.random_range(0..d.groups().len())),
            timeslot: rng.random_range(1..=d.classes_per_day()),
            audience: AudienceId(rng.random_range(0..d.audiences().len())),
        }
    }

    fn random_genes<R: Rng>(&self, rng: &mut R) -> Vec<Assignment> {
        (0..self.gene_count())
            .map(|s| self.random_assignment(SubjectId(s), rng))
            .collect()
    }

    /// Creates a random schedule, one independent draw per subject.
    pub fn random_schedule<R: Rng>(&self, rng: &mut R) -> Schedule {
        let genes = self.random_genes(rng);
        self.schedule(genes)
    }

    /// Creates `size` random schedules.
    ///
    /// Genes are always drawn sequentially. With the `parallel` feature and
    /// `parallel == true`, only the evaluation fans out, so the result is
    /// the same either way.
    pub fn random_population<R: Rng>(&self, size: usize, rng: &mut R, parallel: bool) -> Vec<Schedule> {
        let genes: Vec<Vec<Assignment>> = (0..size).map(|_| self.random_genes(rng)).collect();

        #[cfg(feature = "parallel")]
        if parallel {
            return genes.into_par_iter().map(|g| self.schedule(g)).collect();
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        genes.into_iter().map(|g| self.schedule(g)).collect()
    }

    /// Returns a mutated copy of `schedule`.
    ///
    /// Each locus is redrawn with probability `gene_rate`; the input is not
    /// modified.
    pub fn mutate<R: Rng>(&self, schedule: &Schedule, gene_rate: f64, rng: &mut R) -> Schedule {
        let genes = resample_genes(schedule.assignments(), gene_rate, rng, |locus, rng| {
            self.random_assignment(SubjectId(locus), rng)
        });
        self.schedule(genes)
    }

    /// Two-point crossover of two schedules.
    ///
    /// The first child keeps `a`'s outer segments with `b`'s middle, the
    /// second the reverse.
    pub fn crossover<R: Rng>(&self, a: &Schedule, b: &Schedule, rng: &mut R) -> (Schedule, Schedule) {
        let (x, y) = two_point_crossover(a.assignments(), b.assignments(), rng);
        (self.schedule(x), self.schedule(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn dataset() -> Dataset {
        Dataset::builder()
            .with_subjects(["A", "B", "C", "D"])
            .with_teachers(["T1", "T2", "T3"])
            .with_groups(["G1", "G2"])
            .with_audiences(["R1", "R2"])
            .with_classes_per_day(4)
            .with_teacher_subjects("T1", ["A", "B"])
            .with_teacher_subjects("T2", ["C", "D"])
            .with_group_subjects("G1", ["A", "B", "C", "D"])
            .build()
            .unwrap()
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rejects_invalid_deserialized_dataset() {
        let json = r#"{
            "subjects": ["A", "B"],
            "teachers": ["T"],
            "groups": ["G"],
            "audiences": ["R"],
            "classes_per_day": 1
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(
            TimetableProblem::new(&dataset).unwrap_err(),
            ConfigError::TooFewSubjects(2)
        );
    }

    fn gene(subject: usize, teacher: usize, group: usize, timeslot: u32, audience: usize) -> Assignment {
        Assignment {
            subject: SubjectId(subject),
            teacher: TeacherId(teacher),
            group: GroupId(group),
            timeslot,
            audience: AudienceId(audience),
        }
    }

    #[test]
    fn test_try_schedule_accepts_valid_genes() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let genes = vec![gene(0, 0, 0, 1, 0), gene(1, 0, 0, 2, 1), gene(2, 1, 0, 3, 0), gene(3, 1, 0, 4, 1)];

        let schedule = problem.try_schedule(genes.clone()).unwrap();
        assert_eq!(schedule.assignments(), genes.as_slice());
        assert_eq!(schedule.conflicts(), &problem.evaluator().evaluate(&genes));
        assert!(schedule.conflicts().is_conflict_free());
    }

    #[test]
    fn test_try_schedule_rejects_foreign_genes() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let valid = || vec![gene(0, 0, 0, 1, 0), gene(1, 0, 0, 2, 1), gene(2, 1, 0, 3, 0), gene(3, 1, 0, 4, 1)];

        let short = valid()[..2].to_vec();
        assert_eq!(
            problem.try_schedule(short).unwrap_err(),
            GeneError::WrongLength { expected: 4, found: 2 }
        );

        let mut swapped = valid();
        swapped.swap(1, 2);
        assert_eq!(
            problem.try_schedule(swapped).unwrap_err(),
            GeneError::Misaligned { locus: 1, subject: 2 }
        );

        let mut foreign_teacher = valid();
        foreign_teacher[1].teacher = TeacherId(99);
        assert_eq!(
            problem.try_schedule(foreign_teacher).unwrap_err(),
            GeneError::UnknownId { locus: 1, pool: Pool::Teachers, id: 99 }
        );

        let mut foreign_room = valid();
        foreign_room[3].audience = AudienceId(2);
        assert_eq!(
            problem.try_schedule(foreign_room).unwrap_err(),
            GeneError::UnknownId { locus: 3, pool: Pool::Audiences, id: 2 }
        );

        let mut late = valid();
        late[0].timeslot = 5;
        assert_eq!(
            problem.try_schedule(late).unwrap_err(),
            GeneError::TimeslotOutOfRange { locus: 0, timeslot: 5, classes_per_day: 4 }
        );

        let mut zero = valid();
        zero[2].timeslot = 0;
        assert!(matches!(
            problem.try_schedule(zero),
            Err(GeneError::TimeslotOutOfRange { locus: 2, timeslot: 0, .. })
        ));
    }

    #[test]
    fn test_checked_schedules_breed_and_print() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(3);
        let a = problem
            .try_schedule(vec![gene(0, 0, 0, 1, 0), gene(1, 0, 0, 2, 1), gene(2, 1, 0, 3, 0), gene(3, 1, 0, 4, 1)])
            .unwrap();
        let b = problem.random_schedule(&mut rng);

        let (x, y) = problem.crossover(&a, &b, &mut rng);
        assert_eq!((x.len(), y.len()), (4, 4));
        let text = crate::report::ScheduleReport::new(&dataset, &x).to_string();
        assert!(text.starts_with("Best schedule:"));
    }

    #[test]
    fn test_random_schedule_is_locus_aligned_and_in_range() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(42);

        for _ in 0..200 {
            let schedule = problem.random_schedule(&mut rng);
            assert_eq!(schedule.len(), 4);
            for (i, a) in schedule.assignments().iter().enumerate() {
                assert_eq!(a.subject, SubjectId(i));
                assert!(a.teacher.0 < 3);
                assert!(a.group.0 < 2);
                assert!(a.audience.0 < 2);
                assert!((1..=4).contains(&a.timeslot));
            }
            assert_eq!(
                schedule.conflicts(),
                &problem.evaluator().evaluate(schedule.assignments())
            );
        }
    }

    #[test]
    fn test_random_draws_cover_all_timeslots() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(1);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[problem.random_assignment(SubjectId(0), &mut rng).timeslot as usize] = true;
        }
        assert_eq!(seen, [false, true, true, true, true]);
    }

    #[test]
    fn test_random_population_size_and_determinism() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();

        let a = problem.random_population(25, &mut create_rng(9), false);
        let b = problem.random_population(25, &mut create_rng(9), true);
        assert_eq!(a.len(), 25);
        assert_eq!(a, b, "parallel evaluation must not change the population");
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(42);
        let original = problem.random_schedule(&mut rng);

        let mutated = problem.mutate(&original, 0.0, &mut rng);
        assert!(mutated.same_genes(&original));
        assert_eq!(mutated.fitness(), original.fitness());
    }

    #[test]
    fn test_mutate_rate_one_redraws_everything() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(42);
        let original = problem.random_schedule(&mut rng);
        let snapshot = original.clone();

        let mut differed = false;
        for _ in 0..20 {
            let mutated = problem.mutate(&original, 1.0, &mut rng);
            assert_eq!(mutated.len(), original.len());
            for (i, a) in mutated.assignments().iter().enumerate() {
                assert_eq!(a.subject, SubjectId(i));
            }
            assert_eq!(
                mutated.conflicts(),
                &problem.evaluator().evaluate(mutated.assignments())
            );
            differed |= !mutated.same_genes(&original);
        }
        assert!(differed, "20 full redraws should not all reproduce the input");
        assert_eq!(original, snapshot, "input must be untouched");
    }

    #[test]
    fn test_crossover_identical_parents() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(42);
        let parent = problem.random_schedule(&mut rng);

        for _ in 0..20 {
            let (x, y) = problem.crossover(&parent, &parent, &mut rng);
            assert!(x.same_genes(&parent));
            assert!(y.same_genes(&parent));
            assert_eq!(x.fitness(), parent.fitness());
            assert_eq!(y.fitness(), parent.fitness());
        }
    }

    #[test]
    fn test_crossover_children_rescored() {
        let dataset = dataset();
        let problem = TimetableProblem::new(&dataset).unwrap();
        let mut rng = create_rng(5);
        let a = problem.random_schedule(&mut rng);
        let b = problem.random_schedule(&mut rng);

        for _ in 0..20 {
            let (x, y) = problem.crossover(&a, &b, &mut rng);
            for child in [&x, &y] {
                assert_eq!(child.len(), 4);
                assert_eq!(
                    child.conflicts(),
                    &problem.evaluator().evaluate(child.assignments())
                );
            }
            for i in 0..4 {
                let pair = (x.assignments()[i], y.assignments()[i]);
                let straight = (a.assignments()[i], b.assignments()[i]);
                let swapped = (b.assignments()[i], a.assignments()[i]);
                assert!(pair == straight || pair == swapped);
            }
        }
    }

    #[test]
    fn test_clash_counting_passes_through() {
        let dataset = dataset();
        let problem =
            TimetableProblem::new(&dataset).unwrap().with_clash_counting(ClashCounting::OrderedPairs);
        assert_eq!(problem.evaluator().clash_counting(), ClashCounting::OrderedPairs);
    }
}
