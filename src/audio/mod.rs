//! Audio output: live playback through cpal and WAV persistence.
//!
//! The [`Player`] owns the output device. Each [`Player::play`] call opens a
//! stream at the buffer's sample rate and feeds it through a lock-free ring
//! buffer of [`PlaybackCommand`]s. The calling thread polls a stop flag
//! between chunks, so a Ctrl-C handler can interrupt playback.

pub mod callback;
pub mod command;
pub mod wav;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};
use tracing::{debug, error, info, warn};

pub use command::PlaybackCommand;
pub use wav::{load_wav, read_wav, save_wav, write_wav};

use crate::error::AudioError;
use crate::wave::WaveBuffer;
use callback::PlaybackCallback;

/// Ring buffer capacity (number of chunks in flight).
const RING_BUFFER_CAPACITY: usize = 64;

/// Mono samples per pushed chunk.
const CHUNK_SAMPLES: usize = 1024;

/// How long the player thread sleeps while the queue is full or draining.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Extra time allowed past the buffer's duration before playback is
/// considered stalled.
const STALL_GRACE: Duration = Duration::from_secs(2);

/// How a [`Player::play`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Finished,
    Interrupted,
}

/// Handle on the default output device.
pub struct Player {
    device: cpal::Device,
    channels: u16,
}

impl Player {
    /// Open the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
        let channels = config.channels();

        info!(
            device = device.name().unwrap_or_default(),
            channels, "opened output device"
        );
        Ok(Self { device, channels })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Play `buffer` to the end, or until `stop` is raised.
    ///
    /// Blocks the calling thread.
    pub fn play(&self, buffer: &WaveBuffer, stop: &AtomicBool) -> Result<PlaybackOutcome, AudioError> {
        let rb = HeapRb::<PlaybackCommand>::new(RING_BUFFER_CAPACITY);
        let (mut producer, consumer) = rb.split();
        let played = Arc::new(AtomicUsize::new(0));
        let mut audio_callback = PlaybackCallback::new(consumer, self.channels, Arc::clone(&played));

        let stream_config = cpal::StreamConfig {
            channels: self.channels,
            sample_rate: cpal::SampleRate(buffer.sample_rate()),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            error!(%err, "audio stream error");
        };

        let stream = self
            .device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    audio_callback.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        debug!(
            samples = buffer.len(),
            seconds = buffer.duration_secs(),
            "playback started"
        );

        for chunk in buffer.samples().chunks(CHUNK_SAMPLES) {
            let mut cmd = PlaybackCommand::Samples(chunk.to_vec());
            loop {
                if stop.load(Ordering::Relaxed) {
                    return Ok(interrupt(&mut producer));
                }
                match producer.try_push(cmd) {
                    Ok(()) => break,
                    Err(rejected) => {
                        cmd = rejected;
                        thread::sleep(POLL_INTERVAL);
                    }
                }
            }
        }

        let deadline = Instant::now() + Duration::from_secs_f64(buffer.duration_secs()) + STALL_GRACE;
        while played.load(Ordering::Acquire) < buffer.len() {
            if stop.load(Ordering::Relaxed) {
                return Ok(interrupt(&mut producer));
            }
            if Instant::now() > deadline {
                warn!(
                    played = played.load(Ordering::Acquire),
                    total = buffer.len(),
                    "playback stalled"
                );
                return Err(AudioError::StreamPlay("output stream stopped consuming samples".into()));
            }
            thread::sleep(POLL_INTERVAL);
        }

        debug!("playback finished");
        Ok(PlaybackOutcome::Finished)
    }
}

fn interrupt(producer: &mut ringbuf::HeapProd<PlaybackCommand>) -> PlaybackOutcome {
    // The stream is dropped right after; a full queue just means less to flush.
    let _ = producer.try_push(PlaybackCommand::Stop);
    info!("playback interrupted");
    PlaybackOutcome::Interrupted
}
