//! Grade table, row model and the weighted-average computation.
//!
//! Everything here is pure: no DOM access, no logging.

pub mod gpa;
pub mod grade;
pub mod row;

pub use gpa::{compute_gpa_text, format_gpa, GpaTally};
pub use grade::Grade;
pub use row::{parse_units, CourseRow, EnrolledCourse, RowKind};
