//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Deterministic RNG handle used by the sampling procedures.
///
/// Wraps `StdRng` seeded from a caller supplied `u64`. Substreams are derived
/// by hashing `(master_seed, substream_id)` with SipHash-1-3 under fixed zero
/// keys, so a draw index always maps to the same stream on every platform.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for substream `substream` of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Draws a uniform threshold in `[0, upper)`. Returns `0.0` for an empty range.
    pub fn uniform(&mut self, upper: f64) -> f64 {
        if upper > 0.0 && upper.is_finite() {
            self.rng.gen_range(0.0..upper)
        } else {
            0.0
        }
    }

    /// Returns a mutable reference to the underlying RNG for advanced usage.
    pub fn inner_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
