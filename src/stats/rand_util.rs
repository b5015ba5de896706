//! Seeded pseudo-random streams
//!
//! There is no global generator: every consumer receives an explicit [`Rng`]. Work that may
//! run in parallel asks for an independent [`stream`] per unit of work, keyed by its index, so
//! the outcome does not depend on scheduling.

use std::time::{SystemTime, UNIX_EPOCH};

use oorandom::Rand64;

pub type Rng = Rand64;

/// Creates a generator from a user supplied seed
pub fn seeded(seed: u64) -> Rng {
    let lo = splitmix64(seed);
    let hi = splitmix64(lo);

    Rand64::new((u128::from(hi) << 64) | u128::from(lo))
}

/// Creates a generator seeded from the system clock, returning the seed so the run can be
/// reproduced later
pub fn from_clock() -> (u64, Rng) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x2545_F491_4F6C_DD1D);

    (nanos, seeded(nanos))
}

/// Draws a base seed for a family of streams from `rng`
pub fn base_seed(rng: &mut Rng) -> u128 {
    (u128::from(rng.rand_u64()) << 64) | u128::from(rng.rand_u64())
}

/// Returns the generator for the `index`-th unit of work of the family identified by `base`
///
/// Distinct indices yield statistically independent generators, and the same `(base, index)`
/// pair always yields the same one.
pub fn stream(base: u128, index: u64) -> Rng {
    let lo = splitmix64(base as u64 ^ splitmix64(index));
    let hi = splitmix64((base >> 64) as u64 ^ lo);

    Rand64::new((u128::from(hi) << 64) | u128::from(lo))
}

// SplitMix64 finalizer (Steele, Lea & Flood 2014)
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
