//! Hard-clip distortion: gain followed by a clamp to full scale.

use crate::wave::WaveBuffer;

pub const DEFAULT_GAIN: f64 = 5.0;

/// Amplifies then clamps samples to `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Distortion {
    gain: f32,
}

impl Distortion {
    pub fn new(gain: f64) -> Self {
        Self { gain: gain as f32 }
    }

    #[inline]
    pub fn process(&self, sample: f32) -> f32 {
        (sample * self.gain).clamp(-1.0, 1.0)
    }

    /// Distort an entire buffer in-place.
    pub fn process_block(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

pub fn distortion(signal: &WaveBuffer, gain: f64) -> WaveBuffer {
    let mut out = signal.samples().to_vec();
    Distortion::new(gain).process_block(&mut out);
    WaveBuffer::from_mono(out, signal.sample_rate())
}
