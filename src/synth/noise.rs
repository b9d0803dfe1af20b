//! Seedable noise source shared by the stochastic instrument models.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Uniform and Gaussian noise from a ChaCha8 stream.
///
/// The same seed always yields the same sequence, so stochastic instruments
/// render identically under test.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: ChaCha8Rng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy, for normal (non-reproducible) use.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform sample in `[-1, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen_range(-1.0..1.0)
    }

    /// Normally distributed sample with mean 0 and the given standard deviation.
    pub fn gaussian(&mut self, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * std_dev
    }
}
