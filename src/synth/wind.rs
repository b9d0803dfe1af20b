//! Wind models with a breath-noise component.

use std::f64::consts::PI;

use super::noise::NoiseSource;
use super::oscillator::sawtooth;
use super::Tone;

/// Harmonica reed runs slightly sharp.
const HARMONICA_DETUNE: f64 = 1.005;
const HARMONICA_BREATH: f64 = 0.1;
const HARMONICA_BREATH_DECAY: f64 = 10.0;

const FLUTE_VIBRATO_DEPTH: f64 = 0.005;
const FLUTE_VIBRATO_HZ: f64 = 6.0;
const FLUTE_BREATH: f64 = 0.05;
const FLUTE_BREATH_DECAY: f64 = 5.0;

pub fn harmonica(tone: &Tone, noise: &mut NoiseSource) -> Vec<f64> {
    (0..tone.num_samples)
        .map(|i| {
            let t = tone.time(i);
            let reed = sawtooth(tone.frequency * t * HARMONICA_DETUNE, 0.5);
            let breath = noise.gaussian(HARMONICA_BREATH) * (-HARMONICA_BREATH_DECAY * t).exp();
            reed + breath
        })
        .collect()
}

pub fn flute(tone: &Tone, noise: &mut NoiseSource) -> Vec<f64> {
    (0..tone.num_samples)
        .map(|i| {
            let t = tone.time(i);
            let vibrato = 1.0 + FLUTE_VIBRATO_DEPTH * (2.0 * PI * FLUTE_VIBRATO_HZ * t).sin();
            let body = (2.0 * PI * tone.frequency * t * vibrato).sin();
            body + noise.gaussian(FLUTE_BREATH) * (-FLUTE_BREATH_DECAY * t).exp()
        })
        .collect()
}
