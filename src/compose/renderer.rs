//! Rendering session: a pitch resolver, a synthesizer and the current time
//! signature, with the high-level text → audio operations on top.

use std::sync::atomic::AtomicBool;

use tracing::{info, warn};

use super::{compose, compose_until};
use crate::error::NotationError;
use crate::library::Composition;
use crate::notation::{self, parse_measures, Fraction, Measure, NoteToken, PitchToken, TimeSignature};
use crate::pitch::PitchResolver;
use crate::synth::{Instrument, Synthesizer};
use crate::timeline::{Tempo, Timeline};
use crate::wave::WaveBuffer;

/// Renders notation strings and library compositions to audio.
#[derive(Debug, Clone)]
pub struct Renderer {
    resolver: PitchResolver,
    synth: Synthesizer,
    signature: TimeSignature,
}

impl Renderer {
    /// A session with the standard A4 = 440 Hz tuning and an entropy-seeded
    /// synthesizer.
    pub fn new(signature: TimeSignature) -> Self {
        Self {
            resolver: PitchResolver::default(),
            synth: Synthesizer::from_entropy(),
            signature,
        }
    }

    pub fn with_resolver(mut self, resolver: PitchResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_synthesizer(mut self, synth: Synthesizer) -> Self {
        self.synth = synth;
        self
    }

    pub fn set_time_signature(&mut self, signature: TimeSignature) {
        self.signature = signature;
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.signature
    }

    pub fn beats_per_measure(&self) -> Fraction {
        self.signature.beats_per_measure()
    }

    pub fn resolver(&self) -> &PitchResolver {
        &self.resolver
    }

    /// Measures as written; no alignment to the time signature.
    pub fn parse(&self, notation: &str) -> Vec<Measure> {
        parse_measures(notation)
    }

    /// Timed events for `notation` at `tempo`.
    pub fn events(&self, notation: &str, tempo: Tempo) -> Timeline<'_> {
        Timeline::new(self.parse(notation), tempo, &self.resolver)
    }

    pub fn render(
        &mut self,
        notation: &str,
        tempo: Tempo,
        instrument: Instrument,
        volume: f64,
    ) -> WaveBuffer {
        let measures = parse_measures(notation);
        let events = Timeline::new(measures, tempo, &self.resolver);
        compose(&mut self.synth, events, instrument, volume)
    }

    /// [`Renderer::render`], stopping early once `stop` is raised.
    pub fn render_until(
        &mut self,
        notation: &str,
        tempo: Tempo,
        instrument: Instrument,
        volume: f64,
        stop: &AtomicBool,
    ) -> WaveBuffer {
        let measures = parse_measures(notation);
        let events = Timeline::new(measures, tempo, &self.resolver);
        compose_until(&mut self.synth, events, instrument, volume, stop)
    }

    /// Render a library entry with its own signature, tempo, instrument and
    /// volume. The session's time signature is switched to the entry's.
    pub fn render_composition(
        &mut self,
        composition: &Composition,
        stop: &AtomicBool,
    ) -> Result<WaveBuffer, NotationError> {
        let signature = composition.time_signature()?;
        let tempo = composition.tempo()?;
        let instrument = Instrument::from_name(composition.instrument());
        let volume = composition.volume();
        info!(
            name = %composition.name,
            %instrument,
            bpm = tempo.bpm(),
            %signature,
            "rendering composition"
        );
        self.set_time_signature(signature);
        Ok(self.render_until(&composition.notes, tempo, instrument, volume, stop))
    }

    /// Re-parse `notation` and fit each measure to the session's signature.
    pub fn align_measures(&self, notation: &str) -> Vec<Measure> {
        notation::align_measures(notation, self.signature)
    }

    /// Respell a whole piece with canonical pitch names and normalised
    /// duration expressions, e.g. `"Bbb3/4 rest/8+8"` becomes `"A3/4 rest/4"`.
    ///
    /// Unresolvable pitches and lengths with no short duration expression are
    /// dropped; measures left empty are omitted. The result parses back to the
    /// same pitches and lengths.
    pub fn canonize(&self, notation: &str) -> String {
        let mut bars = Vec::new();
        for measure in self.parse(notation) {
            let tokens: Vec<String> = measure
                .notes
                .iter()
                .filter_map(|token| self.canonize_token(token))
                .collect();
            if !tokens.is_empty() {
                bars.push(tokens.join(" "));
            }
        }
        bars.join(" | ")
    }

    fn canonize_token(&self, token: &NoteToken) -> Option<String> {
        let Some(expr) = token.value.to_duration_expr() else {
            warn!(value = %token.value, "dropping note with no bounded duration expression");
            return None;
        };
        let pitch = match &token.pitch {
            PitchToken::Rest => PitchToken::Rest.to_string(),
            PitchToken::Named(name) => match self.resolver.canonize(name) {
                Ok(canonical) => canonical,
                Err(err) => {
                    warn!(pitch = %name, %err, "dropping unresolvable pitch");
                    return None;
                }
            },
        };
        Some(format!("{pitch}/{expr}"))
    }

    pub fn pitch_to_freq(&self, pitch: &str) -> Result<f64, NotationError> {
        self.resolver.pitch_to_freq(pitch)
    }

    pub fn canonize_pitch(&self, pitch: &str) -> Result<String, NotationError> {
        self.resolver.canonize(pitch)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(TimeSignature::default())
    }
}
