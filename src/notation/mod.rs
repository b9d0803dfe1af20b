//! Notation: text → measures of `(pitch-or-rest, exact duration)` pairs.
//!
//! Format: measures separated by `|`, each holding whitespace-separated
//! `<PITCH>/<DURATION>` tokens, e.g. `"C4/4 E4/4 G4/2 | rest/4 Fx4/4+8 G4/8"`.

pub mod fraction;
pub mod measure;
pub mod parser;
pub mod signature;

pub use fraction::Fraction;
pub use measure::{Measure, NoteToken, PitchToken, SolveOutcome, Validation};
pub use parser::{parse_measures, parse_token};
pub use signature::TimeSignature;

/// Re-parse `notation` and fit every measure to `signature`.
///
/// Each measure gets one solve pass: short measures are padded with a rest,
/// long ones gain an overflow rest (see [`Measure::solve`]).
pub fn align_measures(notation: &str, signature: TimeSignature) -> Vec<Measure> {
    let beats = signature.beats_per_measure();
    let mut measures = parse_measures(notation);
    for measure in &mut measures {
        measure.validate(beats, Validation::Solve);
    }
    measures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_pads_short_measure() {
        let measures = align_measures("C4/4", TimeSignature::COMMON);
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].len(), 2);
        assert_eq!(measures[0].notes[1], NoteToken::rest(Fraction::new(3, 4)));
    }

    #[test]
    fn align_to_waltz_time() {
        let sig: TimeSignature = "3/4".parse().unwrap();
        let measures = align_measures("C4/4 D4/4 E4/4 F4/4 | G4/2", sig);
        // First measure overflows by a quarter, second is a quarter short.
        assert_eq!(measures[0].notes.last(), Some(&NoteToken::rest(Fraction::new(1, 4))));
        assert_eq!(measures[1].notes.last(), Some(&NoteToken::rest(Fraction::new(1, 4))));
        assert_eq!(measures[1].total(), Some(sig.beats_per_measure()));
    }

    #[test]
    fn aligned_measures_pass_strict_unless_overflowed() {
        let sig = TimeSignature::COMMON;
        let mut measures = align_measures("C4/2 | D4/8 | E4/1", sig);
        for m in &mut measures {
            assert!(m.validate(sig.beats_per_measure(), Validation::Strict));
        }
    }
}
