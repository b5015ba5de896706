//! Float trait

use cast::From;
use num_traits::float;

/// The floating point types the numeric core is generic over.
///
/// Adds lossless casting from counts (`usize`) and `f32` literals to
/// `num_traits::float::Float`, and requires `Sync + Send` so the bootstrap can fan out.
pub trait Float:
    float::Float
    + From<usize, Output = Self>
    + From<f32, Output = Self>
    + Sync
    + Send
    + std::fmt::Debug
{
}

impl Float for f32 {}
impl Float for f64 {}
