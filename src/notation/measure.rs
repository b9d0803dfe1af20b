//! Measures and measure-length validation.

use std::fmt;

use tracing::{debug, warn};

use super::Fraction;
use crate::error::MeasureDiagnostic;
use crate::pitch;

/// The pitch field of a note token: a rest or a still-unresolved pitch spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchToken {
    Rest,
    Named(String),
}

impl PitchToken {
    /// Classify a pitch field; `r`/`rest` in any case is a rest.
    pub fn from_text(text: &str) -> Self {
        if pitch::is_rest(text) {
            PitchToken::Rest
        } else {
            PitchToken::Named(text.to_string())
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, PitchToken::Rest)
    }
}

impl fmt::Display for PitchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchToken::Rest => write!(f, "rest"),
            PitchToken::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One `pitch/duration` pair. `value` is in whole notes (`/4` → 1/4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteToken {
    pub pitch: PitchToken,
    pub value: Fraction,
}

impl NoteToken {
    pub fn new(pitch: PitchToken, value: Fraction) -> Self {
        Self { pitch, value }
    }

    pub fn rest(value: Fraction) -> Self {
        Self::new(PitchToken::Rest, value)
    }
}

/// Written back as notation (`C4/4+8`); a value with no duration expression
/// falls back to the bare fraction.
impl fmt::Display for NoteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.to_duration_expr() {
            Some(expr) => write!(f, "{}/{expr}", self.pitch),
            None => write!(f, "{}/{}", self.pitch, self.value),
        }
    }
}

/// How [`Measure::validate`] treats a measure whose length is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Report a mismatch, leave the measure untouched.
    Strict,
    /// Pad with a rest so the measure is accepted.
    Solve,
}

/// What a solve pass did to a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Exact,
    /// A rest of this length was appended to fill the shortfall.
    Padded(Fraction),
    /// The measure was too long; a rest of the overflow length was appended.
    Overflowed(Fraction),
    /// The length or the needed rest cannot be held exactly; nothing changed.
    Unrepresentable,
}

/// An ordered run of note tokens between bar lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measure {
    pub notes: Vec<NoteToken>,
}

impl Measure {
    pub fn new(notes: Vec<NoteToken>) -> Self {
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Exact sum of note values, or `None` if it does not fit.
    pub fn total(&self) -> Option<Fraction> {
        Fraction::checked_sum(self.notes.iter().map(|n| n.value))
    }

    /// Append `note` unless the measure length would stop being
    /// representable. Returns whether the note was kept.
    pub fn try_push(&mut self, note: NoteToken) -> bool {
        let fits = self
            .total()
            .and_then(|total| total.checked_add(note.value))
            .is_some();
        if fits {
            self.notes.push(note);
        }
        fits
    }

    /// Compare the measure length against `beats` without modifying anything.
    pub fn check(&self, beats: Fraction) -> Result<(), MeasureDiagnostic> {
        match self.total() {
            Some(actual) if actual == beats => Ok(()),
            Some(actual) => Err(MeasureDiagnostic::MeasureDurationMismatch {
                expected: beats,
                actual,
            }),
            None => Err(MeasureDiagnostic::MeasureUnrepresentable { expected: beats }),
        }
    }

    /// Append a rest so the measure is accepted against `beats`.
    ///
    /// A short measure gains a rest of the shortfall. A long measure gains a
    /// rest of the overflow; it is not truncated.
    pub fn solve(&mut self, beats: Fraction) -> SolveOutcome {
        let Some(actual) = self.total() else {
            warn!("{}", MeasureDiagnostic::MeasureUnrepresentable { expected: beats });
            return SolveOutcome::Unrepresentable;
        };
        if actual == beats {
            return SolveOutcome::Exact;
        }
        let gap = if actual < beats {
            beats.checked_sub(actual)
        } else {
            actual.checked_sub(beats)
        };
        let Some(gap) = gap.filter(|gap| actual.checked_add(*gap).is_some()) else {
            warn!("{}", MeasureDiagnostic::MeasureUnrepresentable { expected: beats });
            return SolveOutcome::Unrepresentable;
        };
        self.notes.push(NoteToken::rest(gap));
        if actual < beats {
            SolveOutcome::Padded(gap)
        } else {
            let diag = MeasureDiagnostic::MeasureOverflow {
                expected: beats,
                actual,
                overflow: gap,
            };
            warn!("{diag}");
            SolveOutcome::Overflowed(gap)
        }
    }

    /// Validate against `beats`. Strict mode returns `false` on a mismatch;
    /// solve mode repairs the measure and returns `true` unless its length
    /// cannot be represented.
    pub fn validate(&mut self, beats: Fraction, mode: Validation) -> bool {
        match mode {
            Validation::Strict => match self.check(beats) {
                Ok(()) => true,
                Err(diag) => {
                    debug!("{diag}");
                    false
                }
            },
            Validation::Solve => self.solve(beats) != SolveOutcome::Unrepresentable,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.notes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter(pitch: &str) -> NoteToken {
        NoteToken::new(PitchToken::from_text(pitch), Fraction::new(1, 4))
    }

    #[test]
    fn rest_words_classify() {
        for word in ["r", "R", "rest", "Rest", "REST"] {
            assert!(PitchToken::from_text(word).is_rest(), "{word}");
        }
        assert!(!PitchToken::from_text("C4").is_rest());
    }

    #[test]
    fn strict_accepts_full_measure() {
        let mut m = Measure::new(vec![quarter("C4"), quarter("E4"), quarter("G4"), quarter("C5")]);
        assert!(m.validate(Fraction::ONE, Validation::Strict));
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn strict_rejects_without_mutation() {
        let mut m = Measure::new(vec![quarter("C4")]);
        assert!(!m.validate(Fraction::ONE, Validation::Strict));
        assert_eq!(m.len(), 1);
        assert_eq!(
            m.check(Fraction::ONE),
            Err(MeasureDiagnostic::MeasureDurationMismatch {
                expected: Fraction::ONE,
                actual: Fraction::new(1, 4),
            })
        );
    }

    #[test]
    fn solve_pads_shortfall() {
        let mut m = Measure::new(vec![quarter("C4")]);
        assert_eq!(m.solve(Fraction::ONE), SolveOutcome::Padded(Fraction::new(3, 4)));
        assert_eq!(m.len(), 2);
        assert_eq!(m.notes[1], NoteToken::rest(Fraction::new(3, 4)));
        assert!(m.validate(Fraction::ONE, Validation::Strict));
    }

    #[test]
    fn solve_pads_overflow_with_rest() {
        let mut m = Measure::new(vec![quarter("C4"); 5]);
        assert!(m.validate(Fraction::ONE, Validation::Solve));
        assert_eq!(m.len(), 6);
        assert_eq!(m.notes[5], NoteToken::rest(Fraction::new(1, 4)));
        // Overflow padding lengthens the measure further.
        assert_eq!(m.total(), Some(Fraction::new(3, 2)));
    }

    #[test]
    fn solve_leaves_exact_measure() {
        let mut m = Measure::new(vec![quarter("C4"), quarter("D4"), quarter("E4")]);
        assert_eq!(m.solve(Fraction::new(3, 4)), SolveOutcome::Exact);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn empty_measure_total_is_zero() {
        let m = Measure::default();
        assert!(m.is_empty());
        assert_eq!(m.total(), Some(Fraction::ZERO));
    }

    #[test]
    fn display_writes_notation() {
        let m = Measure::new(vec![
            NoteToken::new(PitchToken::from_text("Fx4"), Fraction::new(3, 8)),
            NoteToken::rest(Fraction::new(5, 8)),
        ]);
        assert_eq!(m.to_string(), "Fx4/4+8 rest/2+8");
        assert_eq!(Measure::default().to_string(), "");
    }

    #[test]
    fn try_push_refuses_unrepresentable_length() {
        let mut m = Measure::default();
        for den in [1_000_000_007, 1_000_000_009] {
            assert!(m.try_push(NoteToken::new(PitchToken::from_text("C4"), Fraction::new(1, den))));
        }
        let third = NoteToken::new(PitchToken::from_text("E4"), Fraction::new(1, 1_000_000_021));
        assert!(!m.try_push(third));
        assert_eq!(m.len(), 2);
        assert!(m.total().unwrap().is_positive());
    }

    #[test]
    fn unrepresentable_measure_is_reported_not_repaired() {
        let mut m = Measure::new(
            [1_000_000_007, 1_000_000_009, 1_000_000_021]
                .into_iter()
                .map(|den| NoteToken::rest(Fraction::new(1, den)))
                .collect(),
        );
        assert_eq!(m.total(), None);
        assert_eq!(
            m.check(Fraction::ONE),
            Err(MeasureDiagnostic::MeasureUnrepresentable {
                expected: Fraction::ONE
            })
        );
        assert!(!m.validate(Fraction::ONE, Validation::Strict));
        assert!(!m.validate(Fraction::ONE, Validation::Solve));
        assert_eq!(m.len(), 3);
    }
}
