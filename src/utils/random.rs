//! Seeded random streams.
//!
//! The layout engine owns one sequential `StdRng`. Phases that run in parallel
//! draw from private sub-streams instead, each seeded from the engine seed,
//! the step number and the body index, so results never depend on how rayon
//! schedules the work.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::models::Vector3;

/// Derives the seed of an independent sub-stream.
///
/// Based on the splitmix64 finalizer; distinct `(stream, index)` pairs give
/// well separated seeds even when the inputs differ by a single bit.
pub fn sub_seed(seed: u64, stream: u64, index: u64) -> u64 {
    let mut z = seed
        ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ index.wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A `StdRng` that is only seeded the first time it is drawn from.
///
/// Zero-distance jitter is rare, so most force queries never pay for
/// generator initialization.
#[derive(Debug)]
pub struct LazyRng {
    seed: u64,
    rng: Option<StdRng>,
}

impl LazyRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: None }
    }

    fn inner(&mut self) -> &mut StdRng {
        let seed = self.seed;
        self.rng.get_or_insert_with(|| StdRng::seed_from_u64(seed))
    }
}

impl RngCore for LazyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner().next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner().fill_bytes(dst)
    }
}

/// Returns a small random displacement used in place of a zero-length one.
///
/// Each component is uniform in `[-0.01, 0.01)`. The all-zero vector is
/// redrawn so callers can always divide by its length.
pub fn jitter_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    loop {
        let v = Vector3::new(
            (rng.random::<f64>() - 0.5) / 50.0,
            (rng.random::<f64>() - 0.5) / 50.0,
            (rng.random::<f64>() - 0.5) / 50.0,
        );
        if v.length() > 0.0 {
            return v;
        }
    }
}
