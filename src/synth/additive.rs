//! Additive models: sums of weighted sine partials.

use std::f64::consts::PI;

use super::Tone;

/// Organ drawbars as (frequency multiple, amplitude).
pub const ORGAN_PARTIALS: [(f64, f64); 4] = [(1.0, 0.6), (2.0, 0.4), (3.0, 0.3), (4.0, 0.2)];

/// Inharmonic bell partials as (frequency multiple, amplitude).
pub const BELL_PARTIALS: [(f64, f64); 4] = [(1.0, 0.6), (2.76, 0.4), (5.43, 0.3), (8.12, 0.2)];

/// Per-partial decay rate of the bell.
const BELL_PARTIAL_DECAY: f64 = 0.5;

fn partials(tone: &Tone, table: &[(f64, f64)], decay: f64) -> Vec<f64> {
    (0..tone.num_samples)
        .map(|i| {
            let t = tone.time(i);
            let ring = (-decay * t).exp();
            table
                .iter()
                .map(|&(multiple, amp)| amp * (2.0 * PI * tone.frequency * multiple * t).sin() * ring)
                .sum()
        })
        .collect()
}

pub fn organ(tone: &Tone) -> Vec<f64> {
    partials(tone, &ORGAN_PARTIALS, 0.0)
}

pub fn bell(tone: &Tone) -> Vec<f64> {
    partials(tone, &BELL_PARTIALS, BELL_PARTIAL_DECAY)
}
