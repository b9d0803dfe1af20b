//! Playback callback. Runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, spreads each mono sample across the
//! device's channels and reports how many frames have been played.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::PlaybackCommand;

/// Consumed samples are compacted once `read_pos` passes this.
const COMPACT_THRESHOLD: usize = 8192;

/// State owned by the audio thread.
pub struct PlaybackCallback {
    consumer: HeapCons<PlaybackCommand>,
    pending: Vec<f32>,
    read_pos: usize,
    channels: usize,
    played: Arc<AtomicUsize>,
}

impl PlaybackCallback {
    /// `played` is incremented by the number of real (non-silence) frames
    /// written on every call.
    pub fn new(consumer: HeapCons<PlaybackCommand>, channels: u16, played: Arc<AtomicUsize>) -> Self {
        Self {
            consumer,
            pending: Vec::new(),
            read_pos: 0,
            channels: channels.max(1) as usize,
            played,
        }
    }

    /// Fill one interleaved output block.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                PlaybackCommand::Samples(data) => self.pending.extend_from_slice(&data),
                PlaybackCommand::Stop => {
                    self.pending.clear();
                    self.read_pos = 0;
                }
            }
        }

        let mut frames = 0;
        for frame in output.chunks_mut(self.channels) {
            let sample = match self.pending.get(self.read_pos) {
                Some(&s) => {
                    self.read_pos += 1;
                    frames += 1;
                    s.clamp(-1.0, 1.0)
                }
                None => 0.0,
            };
            frame.fill(sample);
        }
        self.played.fetch_add(frames, Ordering::Release);

        if self.read_pos >= COMPACT_THRESHOLD {
            self.pending.drain(..self.read_pos);
            self.read_pos = 0;
        }
    }

    /// Samples queued but not yet played.
    pub fn backlog(&self) -> usize {
        self.pending.len() - self.read_pos
    }
}
