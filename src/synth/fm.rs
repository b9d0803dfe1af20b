//! Bass via simple two-operator phase modulation.

use std::f64::consts::PI;

use super::Tone;

/// Modulator runs at twice the carrier frequency.
const MOD_RATIO: f64 = 2.0;
const MOD_INDEX: f64 = 0.5;

pub fn bass(tone: &Tone) -> Vec<f64> {
    let f = tone.frequency;
    (0..tone.num_samples)
        .map(|i| {
            let t = tone.time(i);
            let modulator = MOD_INDEX * (2.0 * PI * MOD_RATIO * f * t).sin();
            (2.0 * PI * f * t + modulator).sin()
        })
        .collect()
}
