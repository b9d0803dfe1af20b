//! Whole-buffer post effects. Each returns a new buffer of the same length.

pub mod distortion;
pub mod echo;
pub mod reverb;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use distortion::{distortion, Distortion};
pub use echo::echo;
pub use reverb::reverb;

use crate::wave::WaveBuffer;

/// A post effect with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Echo { delay_secs: f64, decay: f64 },
    Reverb { decay: f64 },
    Distortion { gain: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect {0:?} (expected echo, reverb or distortion)")]
pub struct UnknownEffect(pub String);

impl Effect {
    pub fn echo() -> Self {
        Effect::Echo {
            delay_secs: echo::DEFAULT_DELAY_SECS,
            decay: echo::DEFAULT_DECAY,
        }
    }

    pub fn reverb() -> Self {
        Effect::Reverb {
            decay: reverb::DEFAULT_DECAY,
        }
    }

    pub fn distortion() -> Self {
        Effect::Distortion {
            gain: distortion::DEFAULT_GAIN,
        }
    }

    pub fn apply(&self, signal: &WaveBuffer) -> WaveBuffer {
        match *self {
            Effect::Echo { delay_secs, decay } => echo(signal, delay_secs, decay),
            Effect::Reverb { decay } => reverb(signal, decay),
            Effect::Distortion { gain } => distortion(signal, gain),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Echo { .. } => "echo",
            Effect::Reverb { .. } => "reverb",
            Effect::Distortion { .. } => "distortion",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an effect name into that effect with default parameters.
impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "echo" => Ok(Effect::echo()),
            "reverb" => Ok(Effect::reverb()),
            "distortion" => Ok(Effect::distortion()),
            _ => Err(UnknownEffect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("echo".parse::<Effect>(), Ok(Effect::echo()));
        assert_eq!("Reverb".parse::<Effect>(), Ok(Effect::reverb()));
        assert_eq!(" distortion ".parse::<Effect>(), Ok(Effect::distortion()));
        assert!("chorus".parse::<Effect>().is_err());
    }

    #[test]
    fn every_effect_preserves_length() {
        let buf = WaveBuffer::from_mono((0..10_000).map(|i| (i as f32 * 0.01).sin() * 0.5).collect(), 44100);
        for effect in [Effect::echo(), Effect::reverb(), Effect::distortion()] {
            let out = effect.apply(&buf);
            assert_eq!(out.len(), buf.len(), "{effect}");
            assert_eq!(out.sample_rate(), buf.sample_rate());
        }
    }

    #[test]
    fn apply_does_not_touch_input() {
        let buf = WaveBuffer::from_mono(vec![0.5, -0.5, 0.25], 10);
        let copy = buf.clone();
        let _ = Effect::distortion().apply(&buf);
        assert_eq!(buf, copy);
    }
}
