//! Units-weighted GPA over the qualifying rows

use serde::Serialize;
use tracing::debug;

use super::row::CourseRow;
use crate::config::DisplayFormat;
use crate::error::GpaResult;

/// Running sums over a set of rows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GpaTally {
    /// Sum of units over qualifying rows
    pub total_units: f64,
    /// Sum of `units * points` over qualifying rows
    pub total_points: f64,
    /// Rows that contributed
    pub counted_rows: usize,
    /// Rows excluded for blank or invalid input
    pub skipped_rows: usize,
}

impl GpaTally {
    /// Creates an empty tally
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates one row.
    ///
    /// A row that does not qualify only bumps `skipped_rows` and returns the
    /// reason it was left out.
    pub fn record(&mut self, row: &CourseRow) -> GpaResult<()> {
        match row.parsed() {
            Ok((units, grade)) => {
                self.total_units += units;
                self.total_points += units * grade.points();
                self.counted_rows += 1;
                Ok(())
            }
            Err(err) => {
                self.skipped_rows += 1;
                Err(err)
            }
        }
    }

    /// Tallies rows in order, logging each excluded row
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a CourseRow>,
    {
        let mut tally = Self::new();
        for (index, row) in rows.into_iter().enumerate() {
            match tally.record(row) {
                Ok(()) => {}
                Err(err) if err.is_row_level() => debug!(index, %err, "row excluded from GPA"),
                Err(err) => debug!(index, %err, "row could not be tallied"),
            }
        }
        tally
    }

    /// The GPA, or `None` when nothing qualifies or the sums overflowed
    #[must_use]
    pub fn gpa(&self) -> Option<f64> {
        if self.total_units == 0.0 {
            return None;
        }
        Some(self.total_points / self.total_units).filter(|gpa| gpa.is_finite())
    }

    /// Display text for this tally
    #[must_use]
    pub fn display(&self, format: &DisplayFormat) -> String {
        format_gpa(self.gpa(), format)
    }
}

/// Formats a GPA for the display element
#[must_use]
pub fn format_gpa(gpa: Option<f64>, format: &DisplayFormat) -> String {
    match gpa {
        Some(value) => format!("{:.*}", format.decimals, value),
        None => format.placeholder.clone(),
    }
}

/// Tallies rows and formats the result with the default display format
#[must_use]
pub fn compute_gpa_text(rows: &[CourseRow]) -> String {
    GpaTally::from_rows(rows).display(&DisplayFormat::default())
}
