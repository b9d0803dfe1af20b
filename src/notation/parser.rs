//! Notation tokenizer: `"C4/4 E4/4 | G4/2 rest/2"` → measures.
//!
//! Tokens that do not fit `<pitch-or-rest>/<duration>` are skipped rather than
//! reported, so one stray symbol never loses a whole piece.

use tracing::debug;

use super::{Fraction, Measure, NoteToken, PitchToken};
use crate::pitch;

/// Measure separator.
pub const BAR: char = '|';

/// Split a notation string into measures of note tokens.
///
/// Whitespace (including newlines) is normalised, empty bars are dropped, and
/// unreadable tokens are skipped with a debug trace. So is a token that would
/// push its measure's exact length out of range.
pub fn parse_measures(notation: &str) -> Vec<Measure> {
    notation
        .split(BAR)
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .map(parse_measure)
        .collect()
}

fn parse_measure(tokens: Vec<&str>) -> Measure {
    let mut measure = Measure::default();
    for token in tokens {
        let Some(note) = parse_token(token) else {
            continue;
        };
        if !measure.try_push(note) {
            debug!(token, "skipping token: measure length out of range");
        }
    }
    measure
}

/// Read one `pitch/duration` token. Returns `None` for anything else.
pub fn parse_token(token: &str) -> Option<NoteToken> {
    let Some((pitch_text, duration_text)) = token.split_once('/') else {
        debug!(token, "skipping token without '/'");
        return None;
    };

    if !is_pitch_field(pitch_text) {
        debug!(token, "skipping token with unreadable pitch field");
        return None;
    }

    match Fraction::from_duration_expr(duration_text) {
        Ok(value) => Some(NoteToken::new(PitchToken::from_text(pitch_text), value)),
        Err(err) => {
            debug!(token, %err, "skipping token with unreadable duration");
            None
        }
    }
}

/// A rest word, or a letter A–G followed eventually by an octave digit.
/// The full pitch grammar is checked later, by the pitch resolver.
fn is_pitch_field(text: &str) -> bool {
    if pitch::is_rest(text) {
        return true;
    }
    let mut chars = text.chars();
    let first_is_letter = chars
        .next()
        .is_some_and(|c| matches!(c.to_ascii_uppercase(), 'A'..='G'));
    let last_is_digit = text.chars().last().is_some_and(|c| c.is_ascii_digit());
    first_is_letter && last_is_digit
}
