//! Timetabling domain model.
//!
//! - [`Dataset`]: the read-only description of what must be scheduled
//! - [`Assignment`]: one gene, binding a subject to a teacher, group,
//!   timeslot and audience
//! - [`Schedule`]: one candidate timetable with its cached score

mod dataset;
mod schedule;

pub use dataset::{Dataset, DatasetBuilder};
pub use schedule::{Assignment, AudienceId, GroupId, Schedule, SubjectId, TeacherId};
