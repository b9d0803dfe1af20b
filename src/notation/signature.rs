//! Time signatures.

use std::fmt;
use std::str::FromStr;

use super::Fraction;
use crate::error::NotationError;

/// A `numerator/denominator` time signature, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
}

impl TimeSignature {
    pub const COMMON: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self, NotationError> {
        if numerator == 0 || denominator == 0 {
            return Err(NotationError::InvalidTimeSignature(format!(
                "{numerator}/{denominator}"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Expected note-value total of one measure, in whole notes (3/4 → 3/4).
    pub fn beats_per_measure(&self) -> Fraction {
        Fraction::new(self.numerator as i64, self.denominator as i64)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::COMMON
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for TimeSignature {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidTimeSignature(s.to_string());
        let (num, den) = s.trim().split_once('/').ok_or_else(invalid)?;
        let num: u32 = num.trim().parse().map_err(|_| invalid())?;
        let den: u32 = den.trim().parse().map_err(|_| invalid())?;
        Self::new(num, den).map_err(|_| invalid())
    }
}
