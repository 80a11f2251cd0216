//! Letter grades and their fixed grade-point values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GpaError, GpaResult};

/// Type-safe letter grade - only the recognised grades can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// A (4.0)
    #[serde(rename = "A")]
    A,
    /// A- (3.7)
    #[serde(rename = "A-")]
    AMinus,
    /// B+ (3.3)
    #[serde(rename = "B+")]
    BPlus,
    /// B (3.0)
    #[serde(rename = "B")]
    B,
    /// B- (2.7)
    #[serde(rename = "B-")]
    BMinus,
    /// C+ (2.3)
    #[serde(rename = "C+")]
    CPlus,
    /// C (2.0)
    #[serde(rename = "C")]
    C,
    /// C- (1.7)
    #[serde(rename = "C-")]
    CMinus,
    /// D+ (1.3)
    #[serde(rename = "D+")]
    DPlus,
    /// D (1.0)
    #[serde(rename = "D")]
    D,
    /// F (0.0)
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// All grades in the order the grade selector offers them
    pub const ALL: [Self; 11] = [
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
    ];

    /// Grade points earned per unit
    #[must_use]
    pub const fn points(&self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Label used both as option text and option value
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Parses a select value. Exact match only: no trimming, no case folding.
    pub fn parse(value: &str) -> GpaResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.label() == value)
            .ok_or_else(|| GpaError::UnknownGrade(value.to_string()))
    }
}

impl FromStr for Grade {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_table() {
        let expected = [4.0, 3.7, 3.3, 3.0, 2.7, 2.3, 2.0, 1.7, 1.3, 1.0, 0.0];
        for (grade, points) in Grade::ALL.iter().zip(expected) {
            assert_eq!(grade.points(), points, "{grade}");
        }
    }

    #[test]
    fn test_selector_order() {
        let labels: Vec<_> = Grade::ALL.iter().map(Grade::label).collect();
        assert_eq!(
            labels,
            ["A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "F"]
        );
    }

    #[test]
    fn test_parse_every_label() {
        for grade in Grade::ALL {
            assert_eq!(Grade::parse(grade.label()).unwrap(), grade);
            assert_eq!(grade.label().parse::<Grade>().unwrap(), grade);
        }
    }

    #[test]
    fn test_parse_blank_is_unknown() {
        assert!(matches!(Grade::parse(""), Err(GpaError::UnknownGrade(_))));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!(Grade::parse("a").is_err());
        assert!(Grade::parse(" A").is_err());
        assert!(Grade::parse("A+").is_err());
        assert!(Grade::parse("E").is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Grade::BPlus).unwrap();
        assert_eq!(json, "\"B+\"");
        let back: Grade = serde_json::from_str("\"C-\"").unwrap();
        assert_eq!(back, Grade::CMinus);
    }

    #[test]
    fn test_display() {
        assert_eq!(Grade::DPlus.to_string(), "D+");
    }
}
