//! # Gradebook Service
//!
//! Cross-entity reads and writes over the student and grade stores:
//! assembling student profiles, routing grade operations by subject, and
//! computing per-subject aggregates.

mod errors;
mod gradebook;
mod profile;

pub use errors::{ServiceError, ServiceResult};
pub use gradebook::GradebookService;
pub use profile::{grade_point_average, sum_grades, StudentGrades, StudentProfile};
