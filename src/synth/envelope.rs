//! Amplitude envelopes shaping each instrument's attack and decay.

use std::f64::consts::PI;

/// Time-varying amplitude multiplier. `t` is seconds since note start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Constant 1.0.
    Flat,
    /// `exp(-rate * t)`.
    Decay { rate: f64 },
    /// Slow attack, `1 - exp(-rate * t)`.
    Swell { rate: f64 },
    /// `exp(-decay * t) * (1 - cos(2π * rate * t))`.
    Tremolo { decay: f64, rate: f64 },
}

impl Envelope {
    pub fn amplitude(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        match *self {
            Envelope::Flat => 1.0,
            Envelope::Decay { rate } => (-rate * t).exp(),
            Envelope::Swell { rate } => 1.0 - (-rate * t).exp(),
            Envelope::Tremolo { decay, rate } => {
                (-decay * t).exp() * (1.0 - (2.0 * PI * rate * t).cos())
            }
        }
    }
}
