//! Mono sample buffers passed between synthesis, effects, playback and WAV I/O.

/// A mono `f32` buffer at a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl WaveBuffer {
    /// Create from raw mono f32 samples.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// `len` samples of silence.
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::from_mono(vec![0.0; len], sample_rate)
    }

    /// An empty buffer.
    pub fn empty(sample_rate: u32) -> Self {
        Self::from_mono(Vec::new(), sample_rate)
    }

    /// The mono sample buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the sample buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value (0.0 when empty).
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// A new buffer holding `self` followed by `other`.
    pub fn concat(&self, other: &WaveBuffer) -> WaveBuffer {
        let mut samples = Vec::with_capacity(self.len() + other.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Self::from_mono(samples, self.sample_rate)
    }

    /// Append `other` to a buffer the caller owns.
    pub fn append(&mut self, other: &WaveBuffer) {
        self.samples.extend_from_slice(&other.samples);
    }
}
