//! Numeric core: samples, percentiles, resampling and bootstrap distributions.
//!
//! Everything in here is group-agnostic; the group-aware layers (`group_stats`, `bootstrap`,
//! `summary`) are built on top of it.

#[cfg(test)]
pub(crate) mod test;

pub mod rand_util;
pub mod univariate;

mod float;

use std::mem;
use std::ops::Deref;

pub use crate::stats::float::Float;
use crate::stats::univariate::Sample;

/// The bootstrap distribution of some parameter
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution<A>(Box<[A]>);

impl<A> Distribution<A>
where
    A: Float,
{
    /// Create a distribution from the given values
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or contains a `NaN`
    pub fn from(values: Box<[A]>) -> Distribution<A> {
        assert!(!values.is_empty() && values.iter().all(|x| !x.is_nan()));

        Distribution(values)
    }

    /// Computes the confidence interval of the population parameter using percentiles
    ///
    /// The bounds are the `50 * (1 - cl)` and `50 * (1 + cl)` percentiles, interpolated
    /// linearly between order statistics (see [`Percentiles::at`](univariate::Percentiles::at)).
    ///
    /// # Panics
    ///
    /// Panics if the `confidence_level` is not in the `(0, 1)` range.
    pub fn confidence_interval(&self, confidence_level: A) -> (A, A)
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        let _0 = A::cast(0);
        let _1 = A::cast(1);
        let _50 = A::cast(50);

        assert!(confidence_level > _0 && confidence_level < _1);

        let percentiles = self.percentiles();

        (
            percentiles.at(_50 * (_1 - confidence_level)),
            percentiles.at(_50 * (_1 + confidence_level)),
        )
    }

    /// The standard deviation of the distribution, i.e. the bootstrap estimate of the
    /// standard error of the parameter
    ///
    /// `NaN` for a distribution with a single value.
    pub fn standard_error(&self) -> A {
        self.std_dev(None)
    }
}

impl<A> Deref for Distribution<A> {
    type Target = Sample<A>;

    fn deref(&self) -> &Sample<A> {
        let slice: &[_] = &self.0;

        // NB `Sample` is `repr(transparent)` and the constructor upholds its invariants
        unsafe { mem::transmute(slice) }
    }
}

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use quickcheck::{quickcheck, TestResult};

    use super::Distribution;

    quickcheck! {
        fn percentile_interval_is_contained(size: u8, start: u8, cl: u8) -> TestResult {
            let size = size as usize;
            let start = start as usize;
            let cl = f64::from(cl) / 256.0;
            if cl <= 0.0 {
                return TestResult::discard();
            }

            if let Some(v) = crate::stats::test::vec::<f64>(size, start) {
                let distribution = Distribution::from(v[start..].to_vec().into_boxed_slice());
                let (lb, ub) = distribution.confidence_interval(cl);

                TestResult::from_bool(
                    distribution.min() <= lb && lb <= ub && ub <= distribution.max()
                )
            } else {
                TestResult::discard()
            }
        }
    }

    #[test]
    fn single_value_distribution() {
        let distribution = Distribution::from(vec![3.5f64].into_boxed_slice());

        assert_eq!(distribution.confidence_interval(0.95), (3.5, 3.5));
        assert!(distribution.standard_error().is_nan());
    }

    #[test]
    fn interval_of_uniform_grid() {
        // 101 evenly spaced points: every percentile lands on an order statistic
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let distribution = Distribution::from(values.into_boxed_slice());
        let (lb, ub) = distribution.confidence_interval(0.95);

        // 50 * (1 - 0.95) is not exactly 2.5 in binary floating point
        assert_relative_eq!(lb, 2.5, epsilon = 1e-9);
        assert_relative_eq!(ub, 97.5, epsilon = 1e-9);
    }
}
