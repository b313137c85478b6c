//! Random source for noise synthesis.
//!
//! Production noise is entropy-seeded so every regeneration looks different.
//! Tests and the `--seed` CLI flag use a fixed seed for reproducible tiles.

use rand::{Error, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// PCG32 random source, seeded either explicitly or from OS entropy.
#[derive(Clone, Debug)]
pub struct NoiseRng {
    inner: Pcg32,
}

impl NoiseRng {
    /// Create a reproducible RNG from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create an RNG from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg32::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for NoiseRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for NoiseRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.inner.try_fill_bytes(dest)
    }
}
