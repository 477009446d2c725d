//! Academic periods, term labels and manual semester plans

use crate::core::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of academic period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    /// First regular semester
    S1,
    /// Second regular semester
    S2,
    /// Winter intersession ("Invierno"), retakes only
    I,
    /// Summer session ("Verano"), retakes only
    V,
}

impl Period {
    /// Whether this is a special (I/V) term that only admits retakes
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::I | Self::V)
    }

    /// Short code used in labels
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::I => "I",
            Self::V => "V",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Period {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S1" => Ok(Self::S1),
            "S2" => Ok(Self::S2),
            "I" => Ok(Self::I),
            "V" => Ok(Self::V),
            _ => Err(PlannerError::InvalidTermLabel(s.to_string())),
        }
    }
}

/// A concrete term: period plus year (e.g., `S1-2025`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Period within the year
    pub period: Period,
    /// Calendar year
    pub year: i32,
}

impl Term {
    /// Create a term
    #[must_use]
    pub const fn new(period: Period, year: i32) -> Self {
        Self { period, year }
    }

    /// Label in `<period>-<year>` form
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// The regular (S1/S2) term that follows this one.
    ///
    /// Winter (I) sits between S1 and S2 of the same year; summer (V)
    /// precedes S1 of the same year. The year saturates at `i32::MAX`.
    #[must_use]
    pub const fn next_regular(self) -> Self {
        match self.period {
            Period::S1 | Period::I => Self::new(Period::S2, self.year),
            Period::S2 => Self::new(Period::S1, self.year.saturating_add(1)),
            Period::V => Self::new(Period::S1, self.year),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.period, self.year)
    }
}

impl FromStr for Term {
    type Err = PlannerError;

    /// Parse `S1-2025`, `s2 2026` or `V/2025`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlannerError::InvalidTermLabel(s.to_string());
        let (period, year) = s
            .trim()
            .split_once(|c: char| matches!(c, '-' | ' ' | '/'))
            .ok_or_else(invalid)?;
        let period = period.parse::<Period>().map_err(|_| invalid())?;
        let year = year.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(period, year))
    }
}

/// One manually entered term of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterPlan {
    /// Period of the term
    pub period: Period,
    /// Year of the term
    pub year: i32,
    /// Course codes taken in the term (order is not significant)
    #[serde(default)]
    pub courses: Vec<String>,
}

impl SemesterPlan {
    /// Create an empty plan for a term
    #[must_use]
    pub const fn new(period: Period, year: i32) -> Self {
        Self {
            period,
            year,
            courses: Vec::new(),
        }
    }

    /// Create a plan for a term with the given courses
    #[must_use]
    pub fn with_courses<I, S>(period: Period, year: i32, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            period,
            year,
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    /// The term this plan covers
    #[must_use]
    pub const fn term(&self) -> Term {
        Term::new(self.period, self.year)
    }

    /// Label of the term (e.g., `S1-2025`)
    #[must_use]
    pub fn label(&self) -> String {
        self.term().label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("s1".parse::<Period>().unwrap(), Period::S1);
        assert_eq!("V".parse::<Period>().unwrap(), Period::V);
        assert!("S3".parse::<Period>().is_err());
        assert_eq!(Period::I.to_string(), "I");
        assert!(Period::I.is_special());
        assert!(Period::V.is_special());
        assert!(!Period::S2.is_special());
    }

    #[test]
    fn test_term_parse() {
        assert_eq!("S1-2025".parse::<Term>().unwrap(), Term::new(Period::S1, 2025));
        assert_eq!("s2 2026".parse::<Term>().unwrap(), Term::new(Period::S2, 2026));
        assert_eq!("V/2024".parse::<Term>().unwrap(), Term::new(Period::V, 2024));
        assert!(matches!(
            "S1".parse::<Term>(),
            Err(PlannerError::InvalidTermLabel(_))
        ));
        assert!("S1-20x5".parse::<Term>().is_err());
    }

    #[test]
    fn test_next_regular_sequence() {
        let s1 = Term::new(Period::S1, 2025);
        assert_eq!(s1.next_regular(), Term::new(Period::S2, 2025));
        assert_eq!(s1.next_regular().next_regular(), Term::new(Period::S1, 2026));
        assert_eq!(Term::new(Period::I, 2025).next_regular(), Term::new(Period::S2, 2025));
        assert_eq!(Term::new(Period::V, 2026).next_regular(), Term::new(Period::S1, 2026));
    }

    #[test]
    fn test_semester_plan_json() {
        let plan: SemesterPlan =
            serde_json::from_str(r#"{"period":"S1","year":2025,"courses":["PRG001"]}"#).unwrap();
        assert_eq!(plan, SemesterPlan::with_courses(Period::S1, 2025, ["PRG001"]));
        assert_eq!(plan.label(), "S1-2025");
    }

    #[test]
    fn test_next_regular_at_last_year() {
        let last = Term::new(Period::S2, i32::MAX);
        assert_eq!(last.next_regular(), Term::new(Period::S1, i32::MAX));
    }
}
