//! Percussive models: swept drum and shaken angklung.

use std::f64::consts::PI;

use super::noise::NoiseSource;
use super::Tone;

/// Drum pitch sweep endpoints (Hz). The sweep ignores the note frequency.
pub const DRUM_SWEEP_START: f64 = 200.0;
pub const DRUM_SWEEP_END: f64 = 50.0;
const DRUM_NOISE: f64 = 0.5;

const ANGKLUNG_NOISE: f64 = 0.3;

/// Sine with a linear 200 → 50 Hz sweep across the note, plus Gaussian noise.
pub fn drum(tone: &Tone, noise: &mut NoiseSource) -> Vec<f64> {
    let n = tone.num_samples;
    let step = if n > 1 {
        (DRUM_SWEEP_END - DRUM_SWEEP_START) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n)
        .map(|i| {
            let sweep = DRUM_SWEEP_START + step * i as f64;
            (2.0 * PI * sweep * tone.time(i)).sin() + noise.gaussian(DRUM_NOISE)
        })
        .collect()
}

/// Sine plus Gaussian noise; the tremolo comes from the envelope.
pub fn angklung(tone: &Tone, noise: &mut NoiseSource) -> Vec<f64> {
    (0..tone.num_samples)
        .map(|i| (2.0 * PI * tone.frequency * tone.time(i)).sin() + noise.gaussian(ANGKLUNG_NOISE))
        .collect()
}
