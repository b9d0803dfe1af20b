//! Single-tap echo.

use crate::wave::WaveBuffer;

pub const DEFAULT_DELAY_SECS: f64 = 0.15;
pub const DEFAULT_DECAY: f64 = 0.5;

/// `out[i] = s[i] + decay * s[i - delay]` for `i >= delay`.
///
/// The output keeps the input length; the echo tail past the end is dropped.
pub fn echo(signal: &WaveBuffer, delay_secs: f64, decay: f64) -> WaveBuffer {
    let input = signal.samples();
    let delay = (signal.sample_rate() as f64 * delay_secs.max(0.0)) as usize;
    let decay = decay as f32;

    let mut out = input.to_vec();
    if delay < input.len() {
        for (o, &s) in out[delay..].iter_mut().zip(input) {
            *o += decay * s;
        }
    }
    WaveBuffer::from_mono(out, signal.sample_rate())
}
