use rand::distributions::{Distribution, Standard};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Random test vector of `size` elements, or `None` when fewer than three would remain after
/// skipping the first `start`
pub fn vec<T>(size: usize, start: usize) -> Option<Vec<T>>
where
    Standard: Distribution<T>,
{
    if size > start + 2 {
        let mut rng = StdRng::from_entropy();

        Some((0..size).map(|_| rng.gen()).collect())
    } else {
        None
    }
}
