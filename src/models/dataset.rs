//! Dataset: subjects, resources and eligibility tables.

use std::collections::HashMap;

use crate::error::{ConfigError, Pool};

use super::schedule::{AudienceId, GroupId, SubjectId, TeacherId};

/// Immutable input of a timetabling run.
///
/// Lists are positional: `SubjectId(i)` names `subjects()[i]`, and so on.
/// The three tables are keyed by name. Entries naming a teacher, group or
/// subject that does not appear in the lists are kept as-is and simply
/// never match, so they behave as missing eligibility rather than errors.
///
/// # Examples
///
/// ```
/// use u_timetable::models::Dataset;
///
/// let dataset = Dataset::builder()
///     .with_subjects(["Algebra", "Physics", "History"])
///     .with_teachers(["Smith", "Jones"])
///     .with_groups(["G1"])
///     .with_audiences(["101"])
///     .with_classes_per_day(4)
///     .with_teacher_subjects("Smith", ["Algebra", "Physics"])
///     .with_group_subjects("G1", ["Algebra", "Physics", "History"])
///     .with_teacher_max_hours("Smith", 6)
///     .build()
///     .unwrap();
///
/// assert_eq!(dataset.subjects().len(), 3);
/// assert_eq!(dataset.classes_per_day(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    subjects: Vec<String>,
    teachers: Vec<String>,
    groups: Vec<String>,
    audiences: Vec<String>,
    classes_per_day: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    teacher_subjects: HashMap<String, Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    group_subjects: HashMap<String, Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    teacher_max_hours: HashMap<String, u32>,
}

impl Dataset {
    /// Starts an empty builder.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// The six-subject university dataset used by the CLI when no dataset
    /// file is given.
    pub fn sample() -> Self {
        Self::builder()
            .with_subjects([
                "Artificial Intelligence",
                "Data Structures",
                "Quantum Computing",
                "Linear Algebra",
                "Thermodynamics",
                "Project Management",
            ])
            .with_teachers(["Ivanova", "Petrov", "Kuznetsov", "Popova", "Sokolov", "Mikhailov"])
            .with_groups(["COMP-101", "PHYS-201", "COMP-102", "PHYS-202", "ENG-301", "ENG-302"])
            .with_audiences(["A1", "A2", "B1", "B2", "C1", "C2"])
            .with_classes_per_day(5)
            .with_teacher_subjects("Ivanova", ["Artificial Intelligence", "Linear Algebra"])
            .with_teacher_subjects("Petrov", ["Data Structures", "Project Management"])
            .with_teacher_subjects("Kuznetsov", ["Quantum Computing"])
            .with_teacher_subjects("Popova", ["Thermodynamics"])
            .with_teacher_subjects("Sokolov", ["Data Structures"])
            .with_teacher_subjects("Mikhailov", ["Project Management", "Linear Algebra"])
            .with_group_subjects("COMP-101", ["Artificial Intelligence", "Linear Algebra"])
            .with_group_subjects("COMP-102", ["Data Structures", "Project Management"])
            .with_group_subjects("PHYS-201", ["Quantum Computing"])
            .with_group_subjects("PHYS-202", ["Thermodynamics"])
            .with_group_subjects("ENG-301", ["Data Structures"])
            .with_group_subjects("ENG-302", ["Project Management"])
            .with_teacher_max_hours("Ivanova", 20)
            .with_teacher_max_hours("Petrov", 30)
            .with_teacher_max_hours("Kuznetsov", 20)
            .with_teacher_max_hours("Popova", 10)
            .with_teacher_max_hours("Sokolov", 30)
            .with_teacher_max_hours("Mikhailov", 20)
            .into_dataset()
    }

    /// Checks the structural requirements of the optimizer.
    ///
    /// Needed after deserialization; [`DatasetBuilder::build`] calls it too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subjects.len() < 3 {
            return Err(ConfigError::TooFewSubjects(self.subjects.len()));
        }
        if self.teachers.is_empty() {
            return Err(ConfigError::EmptyPool(Pool::Teachers));
        }
        if self.groups.is_empty() {
            return Err(ConfigError::EmptyPool(Pool::Groups));
        }
        if self.audiences.is_empty() {
            return Err(ConfigError::EmptyPool(Pool::Audiences));
        }
        if self.classes_per_day == 0 {
            return Err(ConfigError::NoTimeslots);
        }
        Ok(())
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn teachers(&self) -> &[String] {
        &self.teachers
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn audiences(&self) -> &[String] {
        &self.audiences
    }

    /// Number of timeslots; valid timeslots are `1..=classes_per_day`.
    pub fn classes_per_day(&self) -> u32 {
        self.classes_per_day
    }

    /// Subjects a teacher may teach, if the teacher is listed.
    pub fn teacher_subjects(&self, teacher: &str) -> Option<&[String]> {
        self.teacher_subjects.get(teacher).map(Vec::as_slice)
    }

    /// Subjects a group is enrolled in, if the group is listed.
    pub fn group_subjects(&self, group: &str) -> Option<&[String]> {
        self.group_subjects.get(group).map(Vec::as_slice)
    }

    /// Weekly hour cap of a teacher, if any.
    pub fn teacher_max_hours(&self, teacher: &str) -> Option<u32> {
        self.teacher_max_hours.get(teacher).copied()
    }

    /// Name lookups for ids drawn against this dataset.
    ///
    /// # Panics
    /// Panics if the id is outside the dataset; schedules built by
    /// [`TimetableProblem`](crate::ga::TimetableProblem) never hold one.
    pub fn subject_name(&self, id: SubjectId) -> &str {
        &self.subjects[id.0]
    }

    pub fn teacher_name(&self, id: TeacherId) -> &str {
        &self.teachers[id.0]
    }

    pub fn group_name(&self, id: GroupId) -> &str {
        &self.groups[id.0]
    }

    pub fn audience_name(&self, id: AudienceId) -> &str {
        &self.audiences[id.0]
    }
}

/// Builder for [`Dataset`].
///
/// Repeated table entries for the same key replace the earlier one.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    subjects: Vec<String>,
    teachers: Vec<String>,
    groups: Vec<String>,
    audiences: Vec<String>,
    classes_per_day: u32,
    teacher_subjects: HashMap<String, Vec<String>>,
    group_subjects: HashMap<String, Vec<String>>,
    teacher_max_hours: HashMap<String, u32>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl DatasetBuilder {
    /// Sets the subject list. Its order fixes the gene loci.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = owned(subjects);
        self
    }

    pub fn with_teachers<I, S>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teachers = owned(teachers);
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = owned(groups);
        self
    }

    pub fn with_audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audiences = owned(audiences);
        self
    }

    pub fn with_classes_per_day(mut self, n: u32) -> Self {
        self.classes_per_day = n;
        self
    }

    /// Declares the subjects `teacher` is qualified to teach.
    pub fn with_teacher_subjects<I, S>(mut self, teacher: impl Into<String>, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teacher_subjects.insert(teacher.into(), owned(subjects));
        self
    }

    /// Declares the subjects `group` is enrolled in.
    pub fn with_group_subjects<I, S>(mut self, group: impl Into<String>, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_subjects.insert(group.into(), owned(subjects));
        self
    }

    /// Caps the summed timeslot values of `teacher`'s assignments.
    pub fn with_teacher_max_hours(mut self, teacher: impl Into<String>, hours: u32) -> Self {
        self.teacher_max_hours.insert(teacher.into(), hours);
        self
    }

    /// Validates and returns the dataset.
    pub fn build(self) -> Result<Dataset, ConfigError> {
        let dataset = self.into_dataset();
        dataset.validate()?;
        Ok(dataset)
    }

    fn into_dataset(self) -> Dataset {
        Dataset {
            subjects: self.subjects,
            teachers: self.teachers,
            groups: self.groups,
            audiences: self.audiences,
            classes_per_day: self.classes_per_day,
            teacher_subjects: self.teacher_subjects,
            group_subjects: self.group_subjects,
            teacher_max_hours: self.teacher_max_hours,
        }
    }
}
