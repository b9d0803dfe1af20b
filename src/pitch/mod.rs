//! Pitch resolution: spelling ↔ MIDI number ↔ frequency.
//!
//! Enharmonic spellings (`E#4`, `F4`) collapse onto the same MIDI number, so
//! the synthesizer only ever sees frequencies.

pub mod name;

use std::collections::BTreeMap;

pub use name::{Accidental, Letter, PitchName};

use crate::error::NotationError;

/// Lowest MIDI number in the reference frequency table (A0).
pub const TABLE_LOWEST_MIDI: i32 = 21;
/// Highest MIDI number in the reference frequency table (G9).
pub const TABLE_HIGHEST_MIDI: i32 = 127;

/// Whether a pitch field denotes silence (`r`, `rest`, any case).
pub fn is_rest(text: &str) -> bool {
    let text = text.trim();
    text.eq_ignore_ascii_case("r") || text.eq_ignore_ascii_case("rest")
}

/// Equal-temperament resolver with a configurable reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchResolver {
    a4_midi: i32,
    a4_freq: f64,
}

impl PitchResolver {
    /// Resolver tuned so that MIDI `a4_midi` sounds at `a4_freq` Hz.
    pub fn new(a4_midi: i32, a4_freq: f64) -> Self {
        Self { a4_midi, a4_freq }
    }

    pub fn a4_midi(&self) -> i32 {
        self.a4_midi
    }

    pub fn a4_freq(&self) -> f64 {
        self.a4_freq
    }

    /// Parse a pitch token such as `Cx4` or `Bbb3` into a MIDI number.
    pub fn parse(&self, token: &str) -> Result<i32, NotationError> {
        Ok(token.parse::<PitchName>()?.midi())
    }

    /// `a4_freq * 2^((midi - a4_midi) / 12)`.
    pub fn to_frequency(&self, midi: i32) -> f64 {
        self.a4_freq * 2.0f64.powf((midi - self.a4_midi) as f64 / 12.0)
    }

    /// Sharp-only spelling of a MIDI number.
    pub fn to_canonical_name(&self, midi: i32) -> PitchName {
        PitchName::canonical(midi)
    }

    /// Canonical names for A0..=G9 mapped to their frequencies, plus `rest` → 0.
    pub fn frequency_table(&self) -> BTreeMap<String, f64> {
        let mut table: BTreeMap<String, f64> = (TABLE_LOWEST_MIDI..=TABLE_HIGHEST_MIDI)
            .map(|midi| (PitchName::canonical(midi).to_string(), self.to_frequency(midi)))
            .collect();
        table.insert("rest".to_string(), 0.0);
        table
    }

    /// Frequency of a pitch field from notation; rests sound at 0 Hz.
    pub fn pitch_to_freq(&self, text: &str) -> Result<f64, NotationError> {
        if is_rest(text) {
            return Ok(0.0);
        }
        Ok(self.to_frequency(self.parse(text)?))
    }

    /// Canonical spelling of a pitch field (`Bbb3` → `A3`); rests pass through.
    pub fn canonize(&self, text: &str) -> Result<String, NotationError> {
        if is_rest(text) {
            return Ok(text.trim().to_string());
        }
        Ok(self.to_canonical_name(self.parse(text)?).to_string())
    }
}

impl Default for PitchResolver {
    fn default() -> Self {
        Self::new(69, 440.0)
    }
}
