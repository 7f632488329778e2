//! Plain-text rendering of results.

use std::fmt;

use crate::ga::GenerationStats;
use crate::models::{Dataset, Schedule};

/// Renders a schedule with dataset names, one class per line:
///
/// ```text
/// Best schedule:
/// Linear Algebra - Ivanova - COMP-101 - 2 - A1
/// ...
/// Rating: 1
/// ```
pub struct ScheduleReport<'a> {
    dataset: &'a Dataset,
    schedule: &'a Schedule,
}

impl<'a> ScheduleReport<'a> {
    pub fn new(dataset: &'a Dataset, schedule: &'a Schedule) -> Self {
        Self { dataset, schedule }
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dataset;
        writeln!(f, "Best schedule:")?;
        for a in self.schedule.assignments() {
            writeln!(
                f,
                "{} - {} - {} - {} - {}",
                d.subject_name(a.subject),
                d.teacher_name(a.teacher),
                d.group_name(a.group),
                a.timeslot,
                d.audience_name(a.audience)
            )?;
        }
        let c = self.schedule.conflicts();
        writeln!(
            f,
            "Conflicts: {} (clashes {}, unqualified teachers {}, unenrolled groups {}, overtime {})",
            c.total(),
            c.clashes,
            c.unqualified_teachers,
            c.unenrolled_groups,
            c.overtime
        )?;
        write!(f, "Rating: {}", self.schedule.fitness())
    }
}

/// One progress line per generation.
pub fn progress_line(stats: &GenerationStats) -> String {
    format!(
        "Generation {}: Best rating = {}",
        stats.generation, stats.best_fitness
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::ConflictEvaluator;
    use crate::models::{Assignment, AudienceId, GroupId, SubjectId, TeacherId};

    #[test]
    fn test_report_uses_names() {
        let dataset = Dataset::sample();
        let evaluator = ConflictEvaluator::new(&dataset);
        let genes = (0..6)
            .map(|i| Assignment {
                subject: SubjectId(i),
                teacher: TeacherId(0),
                group: GroupId(0),
                timeslot: 1,
                audience: AudienceId(i),
            })
            .collect();
        let schedule = evaluator.schedule(genes);
        let text = ScheduleReport::new(&dataset, &schedule).to_string();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Best schedule:"));
        assert_eq!(
            lines.next(),
            Some("Artificial Intelligence - Ivanova - COMP-101 - 1 - A1")
        );
        assert!(text.contains("Project Management - Ivanova - COMP-101 - 1 - C2"));
        assert!(text.ends_with(&format!("Rating: {}", schedule.fitness())));
    }

    #[test]
    fn test_progress_line() {
        let stats = GenerationStats {
            generation: 3,
            best_fitness: 0.5,
            best_conflicts: 1,
            population_best: 0.5,
            mean_fitness: 0.2,
        };
        assert_eq!(progress_line(&stats), "Generation 3: Best rating = 0.5");
    }
}
