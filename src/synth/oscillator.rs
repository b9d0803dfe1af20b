//! Oscillator primitives: waveform generation from a cycle position.

use std::f64::consts::PI;

/// Available waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    /// Sign of the sine: +1, -1, and 0 exactly at the zero crossings.
    Square,
    /// Rising ramp from -1 to 1 over one cycle.
    Saw,
}

/// Generate a single sample for the given waveform at the specified phase.
///
/// `phase` counts cycles (`frequency * t`); only its fractional part matters.
/// Returns a value in [-1.0, 1.0].
pub fn oscillator(waveform: Waveform, phase: f64) -> f64 {
    let phase = phase.rem_euclid(1.0);
    match waveform {
        Waveform::Sine => (phase * 2.0 * PI).sin(),
        Waveform::Square => sign((phase * 2.0 * PI).sin()),
        Waveform::Saw => 2.0 * phase - 1.0,
    }
}

/// Variable-width sawtooth: rises from -1 to 1 over `width` of the cycle,
/// then falls back to -1. `width = 1` is a rising ramp, `0.5` a triangle.
pub fn sawtooth(phase: f64, width: f64) -> f64 {
    let phase = phase.rem_euclid(1.0);
    let width = width.clamp(0.0, 1.0);
    if phase < width {
        2.0 * phase / width - 1.0
    } else {
        (width + 1.0 - 2.0 * phase) / (1.0 - width)
    }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_at_zero() {
        let v = oscillator(Waveform::Sine, 0.0);
        assert!(v.abs() < 1e-10);
    }

    #[test]
    fn sine_at_quarter() {
        let v = oscillator(Waveform::Sine, 0.25);
        assert!((v - 1.0).abs() < 1e-10);
    }

    #[test]
    fn sine_ignores_whole_cycles() {
        let a = oscillator(Waveform::Sine, 0.3);
        let b = oscillator(Waveform::Sine, 7.3);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn square_is_zero_at_crossing() {
        assert_eq!(oscillator(Waveform::Square, 0.0), 0.0);
    }

    #[test]
    fn square_halves() {
        assert_eq!(oscillator(Waveform::Square, 0.25), 1.0);
        assert_eq!(oscillator(Waveform::Square, 0.75), -1.0);
    }

    #[test]
    fn saw_at_zero() {
        let v = oscillator(Waveform::Saw, 0.0);
        assert!((v - (-1.0)).abs() < 1e-10);
    }

    #[test]
    fn saw_midpoint() {
        let v = oscillator(Waveform::Saw, 0.5);
        assert!(v.abs() < 1e-10);
    }

    #[test]
    fn half_width_sawtooth_is_triangle() {
        assert!((sawtooth(0.0, 0.5) + 1.0).abs() < 1e-10);
        assert!(sawtooth(0.25, 0.5).abs() < 1e-10);
        assert!((sawtooth(0.5, 0.5) - 1.0).abs() < 1e-10);
        assert!(sawtooth(0.75, 0.5).abs() < 1e-10);
    }

    #[test]
    fn full_width_sawtooth_is_ramp() {
        for i in 0..10 {
            let p = i as f64 / 10.0;
            assert!((sawtooth(p, 1.0) - oscillator(Waveform::Saw, p)).abs() < 1e-10);
        }
    }

    #[test]
    fn all_waveforms_bounded() {
        for wf in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Saw,
        ] {
            for i in 0..1000 {
                let phase = i as f64 / 1000.0;
                let v = oscillator(wf, phase);
                assert!(
                    (-1.0..=1.0).contains(&v),
                    "{wf:?} at phase {phase}: {v} out of bounds"
                );
            }
        }
    }
}
