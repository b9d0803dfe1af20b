//! Timeline expansion: measures + tempo → ordered, timed note/rest events.
//!
//! Musical time stays exact ([`Fraction`]) until this boundary, where each
//! token's note value is converted to seconds.

use tracing::warn;

use crate::error::NotationError;
use crate::notation::{Fraction, Measure, NoteToken, PitchToken};
use crate::pitch::PitchResolver;

/// Shortest event the timeline will emit, in seconds.
pub const MIN_EVENT_SECONDS: f64 = 0.01;

/// Tempo in quarter-note beats per minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo(f64);

impl Tempo {
    pub fn new(bpm: f64) -> Result<Self, NotationError> {
        if bpm.is_finite() && bpm > 0.0 {
            Ok(Self(bpm))
        } else {
            Err(NotationError::InvalidTempo(bpm))
        }
    }

    pub fn bpm(self) -> f64 {
        self.0
    }

    pub fn seconds_per_beat(self) -> f64 {
        60.0 / self.0
    }

    /// Length in seconds of a note value given in whole notes.
    pub fn seconds(self, value: Fraction) -> f64 {
        value.to_f64() * 4.0 * self.seconds_per_beat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Note,
    Rest,
}

/// A note or rest with its absolute length and resolved frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub kind: EventKind,
    /// Pitch as written (notes only).
    pub pitch: Option<String>,
    /// Resolved MIDI number (notes only).
    pub midi: Option<i32>,
    /// Hz; 0.0 for rests.
    pub frequency: f64,
    pub seconds: f64,
    /// Note value in whole notes, as parsed.
    pub value: Fraction,
}

impl TimedEvent {
    pub fn is_rest(&self) -> bool {
        self.kind == EventKind::Rest
    }
}

/// Lazy, single-pass expansion of measures into [`TimedEvent`]s.
///
/// Owns the measures it walks; once exhausted it stays exhausted. Tokens whose
/// pitch cannot be resolved, or whose value is not positive, are skipped with
/// a warning.
pub struct Timeline<'r> {
    measures: std::vec::IntoIter<Measure>,
    current: std::vec::IntoIter<NoteToken>,
    resolver: &'r PitchResolver,
    tempo: Tempo,
}

impl<'r> Timeline<'r> {
    pub fn new(measures: Vec<Measure>, tempo: Tempo, resolver: &'r PitchResolver) -> Self {
        Self {
            measures: measures.into_iter(),
            current: Vec::new().into_iter(),
            resolver,
            tempo,
        }
    }

    fn expand(&self, token: &NoteToken) -> Result<TimedEvent, NotationError> {
        if !token.value.is_positive() {
            return Err(NotationError::InvalidDuration(token.value.to_string()));
        }
        let seconds = self.tempo.seconds(token.value).max(MIN_EVENT_SECONDS);

        match &token.pitch {
            PitchToken::Rest => Ok(TimedEvent {
                kind: EventKind::Rest,
                pitch: None,
                midi: None,
                frequency: 0.0,
                seconds,
                value: token.value,
            }),
            PitchToken::Named(name) => {
                let midi = self.resolver.parse(name)?;
                Ok(TimedEvent {
                    kind: EventKind::Note,
                    frequency: self.resolver.to_frequency(midi),
                    pitch: Some(name.clone()),
                    midi: Some(midi),
                    seconds,
                    value: token.value,
                })
            }
        }
    }
}

impl Iterator for Timeline<'_> {
    type Item = TimedEvent;

    fn next(&mut self) -> Option<TimedEvent> {
        loop {
            let Some(token) = self.current.next() else {
                self.current = self.measures.next()?.notes.into_iter();
                continue;
            };

            match self.expand(&token) {
                Ok(event) => return Some(event),
                Err(err) => warn!(pitch = %token.pitch, value = %token.value, %err, "skipping invalid note"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_measures;
    use assert_approx_eq::assert_approx_eq;

    fn expand(notation: &str, bpm: f64) -> Vec<TimedEvent> {
        let resolver = PitchResolver::default();
        Timeline::new(parse_measures(notation), Tempo::new(bpm).unwrap(), &resolver).collect()
    }

    #[test]
    fn tempo_rejects_non_positive() {
        assert!(Tempo::new(0.0).is_err());
        assert!(Tempo::new(-60.0).is_err());
        assert!(Tempo::new(f64::NAN).is_err());
        assert!(Tempo::new(f64::INFINITY).is_err());
    }

    #[test]
    fn quarter_at_60_bpm_is_one_second() {
        let events = expand("C4/4", 60.0);
        assert_eq!(events.len(), 1);
        assert_approx_eq!(events[0].seconds, 1.0);
        assert_approx_eq!(events[0].frequency, 261.6255653005986, 1e-9);
        assert_eq!(events[0].midi, Some(60));
        assert_eq!(events[0].pitch.as_deref(), Some("C4"));
    }

    #[test]
    fn half_note_at_120_bpm() {
        let events = expand("A4/2", 120.0);
        assert_approx_eq!(events[0].seconds, 1.0);
        assert_eq!(events[0].frequency, 440.0);
    }

    #[test]
    fn tie_lengthens_note() {
        let events = expand("C4/4+8", 60.0);
        assert_approx_eq!(events[0].seconds, 1.5);
        assert_eq!(events[0].value, Fraction::new(3, 8));
    }

    #[test]
    fn rests_have_zero_frequency() {
        let events = expand("rest/4 r/8", 60.0);
        assert!(events.iter().all(|e| e.is_rest() && e.frequency == 0.0));
        assert!(events.iter().all(|e| e.pitch.is_none() && e.midi.is_none()));
    }

    #[test]
    fn order_preserved_across_measures() {
        let events = expand("C4/4 D4/4 | E4/4 | F4/4", 120.0);
        let midis: Vec<i32> = events.iter().filter_map(|e| e.midi).collect();
        assert_eq!(midis, [60, 62, 64, 65]);
    }

    #[test]
    fn unresolvable_pitch_skipped() {
        let events = expand("C4/4 C$4/4 D4/4", 60.0);
        let midis: Vec<i32> = events.iter().filter_map(|e| e.midi).collect();
        assert_eq!(midis, [60, 62]);
    }

    #[test]
    fn non_positive_value_skipped() {
        let resolver = PitchResolver::default();
        let measures = vec![Measure::new(vec![
            NoteToken::new(PitchToken::Named("C4".into()), Fraction::ZERO),
            NoteToken::new(PitchToken::Named("D4".into()), Fraction::new(-1, 4)),
            NoteToken::new(PitchToken::Named("E4".into()), Fraction::new(1, 4)),
        ])];
        let events: Vec<_> = Timeline::new(measures, Tempo::new(60.0).unwrap(), &resolver).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].midi, Some(64));
    }

    #[test]
    fn very_short_note_floored() {
        let events = expand("C4/1000", 240.0);
        assert_eq!(events[0].seconds, MIN_EVENT_SECONDS);
    }

    #[test]
    fn exhausted_timeline_stays_empty() {
        let resolver = PitchResolver::default();
        let mut timeline =
            Timeline::new(parse_measures("C4/4"), Tempo::new(60.0).unwrap(), &resolver);
        assert!(timeline.next().is_some());
        assert!(timeline.next().is_none());
        assert!(timeline.next().is_none());
    }

    #[test]
    fn empty_measures_produce_nothing() {
        assert!(expand("", 60.0).is_empty());
        assert!(expand("??? | !!!", 60.0).is_empty());
    }
}
