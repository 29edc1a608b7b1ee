//! Seeded random number generation.
//!
//! Every stochastic operation in the crate takes an explicit seed and builds
//! its generator here, so identical seeds always replay identical draws.

use crate::spin::Spin;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a spin uniformly from {-1, +1}.
pub fn random_spin<R: Rng>(rng: &mut R) -> Spin {
    if rng.random_bool(0.5) {
        Spin::Up
    } else {
        Spin::Down
    }
}
