//! Cheap reverb from four circularly shifted copies of the signal.

use crate::wave::WaveBuffer;

pub const DEFAULT_DECAY: f64 = 0.4;

/// Reflection spacing in samples; reflection `k` lands `k * SPACING` later.
pub const REFLECTION_SPACING: usize = 1000;
pub const REFLECTIONS: usize = 4;

/// `(s + Σ_{k=1..=4} decay * roll(s, 1000k)) / 2`.
///
/// Shifts wrap around the buffer, so the tail of the piece bleeds into its
/// start. Length is unchanged.
pub fn reverb(signal: &WaveBuffer, decay: f64) -> WaveBuffer {
    let input = signal.samples();
    let n = input.len();
    let decay = decay as f32;

    let mut out = input.to_vec();
    if n > 0 {
        for k in 1..=REFLECTIONS {
            let shift = (k * REFLECTION_SPACING) % n;
            for (i, o) in out.iter_mut().enumerate() {
                *o += decay * input[(i + n - shift) % n];
            }
        }
    }
    for o in &mut out {
        *o /= 2.0;
    }
    WaveBuffer::from_mono(out, signal.sample_rate())
}
