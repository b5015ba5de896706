//! Univariate analysis

mod percentiles;
mod resamples;
mod sample;

pub use self::percentiles::Percentiles;
pub use self::resamples::Resamples;
pub use self::sample::Sample;
