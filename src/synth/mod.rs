//! Waveform synthesis: one pure model function per instrument, dispatched
//! from a closed [`Instrument`] enum.
//!
//! Stochastic models draw from the [`Synthesizer`]'s [`NoiseSource`], so a
//! synthesizer built with [`Synthesizer::new`] renders reproducibly.

pub mod additive;
pub mod basic;
pub mod envelope;
pub mod filter;
pub mod fm;
pub mod noise;
pub mod oscillator;
pub mod percussion;
pub mod pluck;
pub mod wind;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use envelope::Envelope;
pub use noise::NoiseSource;

use crate::wave::WaveBuffer;

/// Output sample rate of every synthesized buffer.
pub const SAMPLE_RATE: u32 = 44100;

/// Number of samples covering `seconds`, rounded to nearest.
///
/// Non-finite or negative durations yield zero samples.
pub fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * sample_rate as f64).round() as usize
}

/// The note a model is asked to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f64,
    pub sample_rate: u32,
    pub num_samples: usize,
}

impl Tone {
    /// Seconds since note start for sample `i`.
    pub fn time(&self, i: usize) -> f64 {
        i as f64 / self.sample_rate as f64
    }
}

/// Timbre models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Instrument {
    Piano,
    Guitar,
    Organ,
    Drum,
    Bass,
    Bell,
    Angklung,
    Harmonica,
    Violin,
    Flute,
    #[default]
    Sine,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument {0:?}")]
pub struct UnknownInstrument(pub String);

impl Instrument {
    pub const ALL: [Instrument; 11] = [
        Instrument::Piano,
        Instrument::Guitar,
        Instrument::Organ,
        Instrument::Drum,
        Instrument::Bass,
        Instrument::Bell,
        Instrument::Angklung,
        Instrument::Harmonica,
        Instrument::Violin,
        Instrument::Flute,
        Instrument::Sine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Piano => "piano",
            Instrument::Guitar => "guitar",
            Instrument::Organ => "organ",
            Instrument::Drum => "drum",
            Instrument::Bass => "bass",
            Instrument::Bell => "bell",
            Instrument::Angklung => "angklung",
            Instrument::Harmonica => "harmonica",
            Instrument::Violin => "violin",
            Instrument::Flute => "flute",
            Instrument::Sine => "sine",
        }
    }

    /// Case-insensitive lookup; anything unrecognised plays as a plain sine.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Instrument::Sine)
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Instrument::Piano | Instrument::Guitar | Instrument::Bell => {
                Envelope::Decay { rate: 8.0 }
            }
            Instrument::Drum => Envelope::Decay { rate: 25.0 },
            Instrument::Bass => Envelope::Decay { rate: 4.0 },
            Instrument::Angklung => Envelope::Tremolo {
                decay: 20.0,
                rate: 10.0,
            },
            Instrument::Harmonica => Envelope::Swell { rate: 10.0 },
            Instrument::Violin | Instrument::Flute => Envelope::Swell { rate: 2.0 },
            Instrument::Organ | Instrument::Sine => Envelope::Flat,
        }
    }

    /// Whether the model consumes noise (and so depends on the seed).
    pub fn is_stochastic(&self) -> bool {
        matches!(
            self,
            Instrument::Guitar
                | Instrument::Drum
                | Instrument::Angklung
                | Instrument::Harmonica
                | Instrument::Flute
        )
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Instrument::ALL
            .iter()
            .copied()
            .find(|inst| inst.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}

/// Renders single notes to sample buffers.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    sample_rate: u32,
    noise: NoiseSource,
}

impl Synthesizer {
    /// Reproducible synthesizer: the same seed renders identical buffers.
    pub fn new(seed: u64) -> Self {
        Self::with_noise(NoiseSource::new(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_noise(NoiseSource::from_entropy())
    }

    pub fn with_noise(noise: NoiseSource) -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            noise,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render one note.
    ///
    /// `round(seconds * sample_rate)` samples of
    /// `clip(wave * envelope * volume, -1, 1)`. A non-positive or non-finite
    /// frequency renders silence of the same length.
    pub fn synthesize(
        &mut self,
        frequency: f64,
        seconds: f64,
        instrument: Instrument,
        volume: f64,
    ) -> WaveBuffer {
        let num_samples = sample_count(seconds, self.sample_rate);
        if num_samples == 0 {
            return WaveBuffer::empty(self.sample_rate);
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return WaveBuffer::silence(num_samples, self.sample_rate);
        }

        let tone = Tone {
            frequency,
            sample_rate: self.sample_rate,
            num_samples,
        };
        let noise = &mut self.noise;
        let wave = match instrument {
            Instrument::Piano => basic::piano(&tone),
            Instrument::Guitar => pluck::guitar(&tone, noise),
            Instrument::Organ => additive::organ(&tone),
            Instrument::Drum => percussion::drum(&tone, noise),
            Instrument::Bass => fm::bass(&tone),
            Instrument::Bell => additive::bell(&tone),
            Instrument::Angklung => percussion::angklung(&tone, noise),
            Instrument::Harmonica => wind::harmonica(&tone, noise),
            Instrument::Violin => basic::violin(&tone),
            Instrument::Flute => wind::flute(&tone, noise),
            Instrument::Sine => basic::sine(&tone),
        };

        let envelope = instrument.envelope();
        let samples = wave
            .iter()
            .enumerate()
            .map(|(i, w)| (w * envelope.amplitude(tone.time(i)) * volume).clamp(-1.0, 1.0) as f32)
            .collect();
        WaveBuffer::from_mono(samples, self.sample_rate)
    }

    /// `round(seconds * sample_rate)` zeros.
    pub fn silence(&self, seconds: f64) -> WaveBuffer {
        WaveBuffer::silence(sample_count(seconds, self.sample_rate), self.sample_rate)
    }
}
