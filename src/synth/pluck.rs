//! Plucked string: Karplus-Strong (noise burst + averaging feedback delay).

use super::filter::butterworth_lowpass;
use super::noise::NoiseSource;
use super::Tone;

/// Length of the initial excitation burst.
pub const BURST_SECONDS: f64 = 0.01;

/// Feedback gain applied to the sum of the two delayed samples.
const FEEDBACK: f64 = 0.49;

/// Karplus-Strong string, low-passed at the note frequency.
///
/// The first `BURST_SECONDS` are uniform noise; every later sample is
/// `FEEDBACK * (y[i-d] + y[i-d-1])` with `d = floor(sr / f)`.
pub fn guitar(tone: &Tone, noise: &mut NoiseSource) -> Vec<f64> {
    let n = tone.num_samples;
    let burst = ((tone.sample_rate as f64 * BURST_SECONDS) as usize).min(n);
    let delay = ((tone.sample_rate as f64 / tone.frequency) as usize).max(1);

    let mut wave = vec![0.0; n];
    for sample in &mut wave[..burst] {
        *sample = noise.uniform();
    }
    for i in burst..n {
        if i < delay {
            continue;
        }
        let older = if i > delay { wave[i - delay - 1] } else { 0.0 };
        wave[i] = FEEDBACK * (wave[i - delay] + older);
    }

    butterworth_lowpass(&mut wave, tone.frequency, tone.sample_rate);
    wave
}
