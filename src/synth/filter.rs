//! Second-order low-pass filter (Audio EQ Cookbook biquad).

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Biquad filter coefficients, normalised by `a0`.
#[derive(Debug, Clone, Copy)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Low-pass coefficients. `q = 1/√2` gives a Butterworth response.
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = 2.0 * PI * cutoff / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Direct-form I biquad with zero initial state.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn process(&mut self, x: f64) -> f64 {
        let c = &self.coeffs;
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Filter `signal` in place through a 2nd-order Butterworth low-pass.
///
/// `cutoff` is held just below Nyquist so very high notes still filter.
pub fn butterworth_lowpass(signal: &mut [f64], cutoff: f64, sample_rate: u32) {
    let sample_rate = sample_rate as f64;
    let cutoff = cutoff.clamp(1.0, 0.99 * sample_rate / 2.0);
    let mut filter = Biquad::new(BiquadCoeffs::lowpass(cutoff, FRAC_1_SQRT_2, sample_rate));
    for sample in signal.iter_mut() {
        *sample = filter.process(*sample);
    }
}
