//! Course rows as read from the table body

use serde::{Deserialize, Serialize};

use super::grade::Grade;
use crate::error::{GpaError, GpaResult};

/// Whether a row is real enrollment data or a what-if addition.
///
/// Fixed when the row is created; there is no transition between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Seeded by the server, never removable
    Enrolled,
    /// Added by the student, freely removable
    #[default]
    Hypothetical,
}

impl RowKind {
    /// Reads the `data-enrolled` attribute. Only `"true"` marks a row enrolled.
    #[must_use]
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::Enrolled,
            _ => Self::Hypothetical,
        }
    }

    /// Value written to the `data-enrolled` attribute
    #[must_use]
    pub const fn attr_value(&self) -> &'static str {
        match self {
            Self::Enrolled => "true",
            Self::Hypothetical => "false",
        }
    }

    /// Returns true if the remove control may delete the row
    #[must_use]
    pub const fn is_removable(&self) -> bool {
        matches!(self, Self::Hypothetical)
    }
}

/// Parses a units value as typed into the number input
pub fn parse_units(raw: &str) -> GpaResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(units) if units.is_finite() => Ok(units),
        _ => Err(GpaError::InvalidUnits(raw.to_string())),
    }
}

/// Snapshot of one table row.
///
/// `None` for a control means the row has no such control at all, which is
/// distinct from a control holding an empty value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseRow {
    /// Optional course name, never used in computation
    pub course_name: Option<String>,
    /// Raw value of the `units` input
    pub units: Option<String>,
    /// Raw value of the `grade` select
    pub grade: Option<String>,
    /// Enrolled or hypothetical
    #[serde(default)]
    pub kind: RowKind,
}

impl CourseRow {
    /// A blank hypothetical row, as produced by the add-class control
    #[must_use]
    pub fn blank() -> Self {
        Self {
            course_name: Some(String::new()),
            units: Some(String::new()),
            grade: Some(String::new()),
            kind: RowKind::Hypothetical,
        }
    }

    /// A hypothetical row with the given inputs
    #[must_use]
    pub fn hypothetical(units: &str, grade: &str) -> Self {
        Self {
            course_name: Some(String::new()),
            units: Some(units.to_string()),
            grade: Some(grade.to_string()),
            kind: RowKind::Hypothetical,
        }
    }

    /// An enrolled row with the given inputs
    #[must_use]
    pub fn enrolled(units: &str, grade: &str) -> Self {
        Self {
            kind: RowKind::Enrolled,
            ..Self::hypothetical(units, grade)
        }
    }

    /// Sets the course name
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.course_name = Some(name.to_string());
        self
    }

    /// Parsed units and grade, or the reason the row does not count.
    ///
    /// A missing control reads as an empty value.
    pub fn parsed(&self) -> GpaResult<(f64, Grade)> {
        let units_raw = self.units.as_deref().unwrap_or_default();
        let units = parse_units(units_raw)?;
        if units <= 0.0 {
            return Err(GpaError::InvalidUnits(units_raw.to_string()));
        }
        let grade = Grade::parse(self.grade.as_deref().unwrap_or_default())?;
        Ok((units, grade))
    }

    /// Units and grade when this row contributes to the GPA
    #[must_use]
    pub fn qualifying(&self) -> Option<(f64, Grade)> {
        self.parsed().ok()
    }
}

/// Enrolled course shipped as JSON by the server instead of markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    /// Course code or title
    #[serde(default)]
    pub course_name: String,
    /// Units the course is worth
    pub units: f64,
    /// Final grade, if one has been posted
    #[serde(default)]
    pub grade: Option<Grade>,
}

impl EnrolledCourse {
    /// Converts into an enrolled row with inputs pre-filled
    #[must_use]
    pub fn to_row(&self) -> CourseRow {
        CourseRow {
            course_name: Some(self.course_name.clone()),
            units: Some(self.units.to_string()),
            grade: Some(self.grade.map(|g| g.label().to_string()).unwrap_or_default()),
            kind: RowKind::Enrolled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== RowKind tests =====

    #[test]
    fn test_kind_from_attr() {
        assert_eq!(RowKind::from_attr(Some("true")), RowKind::Enrolled);
        assert_eq!(RowKind::from_attr(Some("false")), RowKind::Hypothetical);
        assert_eq!(RowKind::from_attr(Some("TRUE")), RowKind::Hypothetical);
        assert_eq!(RowKind::from_attr(None), RowKind::Hypothetical);
    }

    #[test]
    fn test_kind_removable() {
        assert!(!RowKind::Enrolled.is_removable());
        assert!(RowKind::Hypothetical.is_removable());
        assert_eq!(RowKind::default(), RowKind::Hypothetical);
    }

    // ===== parse_units tests =====

    #[test]
    fn test_parse_units_values() {
        assert_eq!(parse_units("3").unwrap(), 3.0);
        assert_eq!(parse_units("1.5").unwrap(), 1.5);
        assert_eq!(parse_units(" 4 ").unwrap(), 4.0);
        assert_eq!(parse_units("-2").unwrap(), -2.0);
    }

    #[test]
    fn test_parse_units_rejects() {
        for raw in ["", "   ", "abc", "inf", "NaN", "3 units"] {
            assert!(
                matches!(parse_units(raw), Err(GpaError::InvalidUnits(_))),
                "{raw:?}"
            );
        }
    }

    // ===== CourseRow tests =====

    #[test]
    fn test_qualifying_row() {
        let row = CourseRow::hypothetical("3", "A");
        assert_eq!(row.qualifying(), Some((3.0, Grade::A)));
    }

    #[test]
    fn test_blank_row_not_qualifying() {
        assert_eq!(CourseRow::blank().qualifying(), None);
    }

    #[test]
    fn test_zero_and_negative_units_excluded() {
        assert_eq!(CourseRow::hypothetical("0", "A").qualifying(), None);
        assert_eq!(CourseRow::hypothetical("-1", "B").qualifying(), None);
    }

    #[test]
    fn test_unselected_grade_excluded() {
        let row = CourseRow::hypothetical("2", "");
        assert_eq!(row.qualifying(), None);
        assert!(matches!(row.parsed(), Err(GpaError::UnknownGrade(_))));
    }

    #[test]
    fn test_missing_controls_excluded() {
        let mut row = CourseRow::hypothetical("3", "A");
        row.units = None;
        assert_eq!(row.qualifying(), None);

        let mut row = CourseRow::hypothetical("3", "A");
        row.grade = None;
        assert_eq!(row.qualifying(), None);
    }

    #[test]
    fn test_enrolled_constructor() {
        let row = CourseRow::enrolled("4", "B").with_name("CS 101");
        assert_eq!(row.kind, RowKind::Enrolled);
        assert_eq!(row.course_name.as_deref(), Some("CS 101"));
        assert_eq!(row.qualifying(), Some((4.0, Grade::B)));
    }

    // ===== EnrolledCourse tests =====

    #[test]
    fn test_enrolled_course_from_json() {
        let course: EnrolledCourse =
            serde_json::from_str(r#"{"course_name":"MATH 2","units":4,"grade":"A-"}"#).unwrap();
        let row = course.to_row();
        assert_eq!(row.kind, RowKind::Enrolled);
        assert_eq!(row.qualifying(), Some((4.0, Grade::AMinus)));
    }

    #[test]
    fn test_enrolled_course_without_grade() {
        let course: EnrolledCourse = serde_json::from_str(r#"{"units":3}"#).unwrap();
        let row = course.to_row();
        assert_eq!(row.grade.as_deref(), Some(""));
        assert_eq!(row.qualifying(), None);
    }
}
