//! Error types for the what-if GPA widget.
//!
//! Nothing here is ever shown to the student. Each variant is turned into
//! silent exclusion, a refused action or deactivation by the widget, and
//! logged at debug level on the way.

use thiserror::Error;

/// Result type alias for widget operations.
pub type GpaResult<T> = std::result::Result<T, GpaError>;

/// Errors that can occur while reading rows or wiring the page.
#[derive(Debug, Error)]
pub enum GpaError {
    /// One of the four required page anchors is absent
    #[error("Required page anchor '{id}' not found")]
    MissingAnchor {
        /// Identifier that was looked up
        id: String,
    },

    /// Units value is blank, non-numeric or not finite
    #[error("Invalid units value: '{0}'")]
    InvalidUnits(String),

    /// Grade value is not one of the recognised letter grades
    #[error("Unknown grade: '{0}'")]
    UnknownGrade(String),

    /// Row index does not address a row of the table body
    #[error("Row {index} out of range (table body has {len} rows)")]
    RowOutOfRange {
        /// Requested row index
        index: usize,
        /// Number of rows present
        len: usize,
    },

    /// Widget configuration could not be parsed
    #[error("Invalid widget configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A browser DOM call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

impl GpaError {
    /// Creates a missing-anchor error
    #[must_use]
    pub fn missing_anchor(id: &str) -> Self {
        Self::MissingAnchor { id: id.to_string() }
    }

    /// Returns true when the error only excludes a single row from the sum
    #[must_use]
    pub const fn is_row_level(&self) -> bool {
        matches!(self, Self::InvalidUnits(_) | Self::UnknownGrade(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_anchor_display() {
        let err = GpaError::missing_anchor("gpaValue");
        assert_eq!(err.to_string(), "Required page anchor 'gpaValue' not found");
    }

    #[test]
    fn test_row_out_of_range_display() {
        let err = GpaError::RowOutOfRange { index: 4, len: 2 };
        assert!(err.to_string().contains("4"));
        assert!(err.to_string().contains("2 rows"));
    }

    #[test]
    fn test_config_from_serde() {
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: GpaError = serde_err.into();
        assert!(matches!(err, GpaError::Config(_)));
    }

    #[test]
    fn test_row_level_classification() {
        assert!(GpaError::InvalidUnits("x".into()).is_row_level());
        assert!(GpaError::UnknownGrade("Z".into()).is_row_level());
        assert!(!GpaError::missing_anchor("whatIfForm").is_row_level());
        assert!(!GpaError::Dom("boom".into()).is_row_level());
    }
}
