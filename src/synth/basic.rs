//! Single-oscillator models.

use super::oscillator::{oscillator, Waveform};
use super::Tone;

fn single(tone: &Tone, waveform: Waveform) -> Vec<f64> {
    (0..tone.num_samples)
        .map(|i| oscillator(waveform, tone.frequency * tone.time(i)))
        .collect()
}

/// Hard square, sign of the sine.
pub fn piano(tone: &Tone) -> Vec<f64> {
    single(tone, Waveform::Square)
}

/// Bowed string approximated by a rising sawtooth.
pub fn violin(tone: &Tone) -> Vec<f64> {
    single(tone, Waveform::Saw)
}

pub fn sine(tone: &Tone) -> Vec<f64> {
    single(tone, Waveform::Sine)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(n: usize) -> Tone {
        Tone {
            frequency: 441.0,
            sample_rate: 44100,
            num_samples: n,
        }
    }

    #[test]
    fn piano_is_three_level() {
        assert!(piano(&tone(1000))
            .iter()
            .all(|&s| s == 1.0 || s == -1.0 || s == 0.0));
    }

    #[test]
    fn violin_ramp_starts_low() {
        let out = violin(&tone(10));
        assert!((out[0] + 1.0).abs() < 1e-12);
        assert!(out[1] > out[0]);
    }

    #[test]
    fn sine_period() {
        // 441 Hz at 44.1 kHz repeats every 100 samples.
        let out = sine(&tone(300));
        assert!((out[25] - 1.0).abs() < 1e-9);
        assert!((out[125] - out[25]).abs() < 1e-9);
    }
}
