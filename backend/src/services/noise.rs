//! Pluggable randomness for the curve synthesizers.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

/// Source of photometric noise.
///
/// Seeded sources replay the same stream, so two syntheses with identical
/// parameters and the same seed produce identical samples.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: ChaChaRng,
}

impl NoiseSource {
    /// Deterministic source for reproducible charts and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaChaRng::seed_from_u64(seed),
        }
    }

    /// Fresh, unseeded source drawing from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaChaRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, unseeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    /// Sample in `[-width/2, width/2)`.
    pub fn uniform_centered(&mut self, width: f64) -> f64 {
        let u: f64 = self.rng.random();
        (u - 0.5) * width
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
