//! Signal composition: timed events rendered and concatenated in order.

pub mod renderer;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

pub use renderer::Renderer;

use crate::synth::{Instrument, Synthesizer};
use crate::timeline::TimedEvent;
use crate::wave::WaveBuffer;

/// Render every event and append it to one buffer.
///
/// Notes go through the synthesizer; rests become zeros of
/// `round(seconds * sample_rate)` samples.
pub fn compose<I>(synth: &mut Synthesizer, events: I, instrument: Instrument, volume: f64) -> WaveBuffer
where
    I: IntoIterator<Item = TimedEvent>,
{
    compose_until(synth, events, instrument, volume, &AtomicBool::new(false))
}

/// Like [`compose`], but checks `stop` before each event and returns what has
/// been rendered so far once it is set.
pub fn compose_until<I>(
    synth: &mut Synthesizer,
    events: I,
    instrument: Instrument,
    volume: f64,
    stop: &AtomicBool,
) -> WaveBuffer
where
    I: IntoIterator<Item = TimedEvent>,
{
    let mut out = WaveBuffer::empty(synth.sample_rate());
    let mut count = 0usize;
    for event in events {
        if stop.load(Ordering::Relaxed) {
            debug!(events = count, "composition interrupted");
            break;
        }
        let chunk = if event.is_rest() {
            synth.silence(event.seconds)
        } else {
            trace!(
                pitch = event.pitch.as_deref().unwrap_or_default(),
                frequency = event.frequency,
                seconds = event.seconds,
                "note"
            );
            synth.synthesize(event.frequency, event.seconds, instrument, volume)
        };
        out.append(&chunk);
        count += 1;
    }
    out
}
