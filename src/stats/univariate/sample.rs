use std::{mem, ops};

use crate::stats::float::Float;
use crate::stats::univariate::Percentiles;

/// A collection of data points drawn from a population
///
/// Invariants:
///
/// - The sample contains at least 1 data point
/// - The sample contains no `NaN`s
///
/// Statistics that need two points (`var`, `std_dev`, `std_err`) return `NaN` on a
/// single-point sample; callers that care check `len()` first.
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` contains any `NaN` or if `slice` is empty
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> &Sample<A> {
        match Sample::checked(slice) {
            Some(sample) => sample,
            None => panic!("a sample must be non-empty and free of NaNs"),
        }
    }

    /// Creates a new sample from an existing slice, or `None` if `slice` is empty or
    /// contains a `NaN`
    pub fn checked(slice: &[A]) -> Option<&Sample<A>> {
        if slice.is_empty() || slice.iter().any(|x| x.is_nan()) {
            None
        } else {
            Some(unsafe { mem::transmute(slice) })
        }
    }

    /// Returns the biggest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn max(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&head) => elems.fold(head, |a, &b| a.max(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = self.len();

        self.sum() / A::cast(n)
    }

    /// Returns the smallest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn min(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&elem) => elems.fold(elem, |a, &b| a.min(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns a "view" into the percentiles of the sample
    ///
    /// This "view" makes consecutive computations of percentiles much faster (`O(1)`)
    ///
    /// - Time: `O(N log N) where N = length`
    /// - Memory: `O(length)`
    pub fn percentiles(&self) -> Percentiles<A>
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        use std::cmp::Ordering;

        // NB This function assumes that there are no `NaN`s in the sample
        fn cmp<T>(a: &T, b: &T) -> Ordering
        where
            T: PartialOrd,
        {
            match a.partial_cmp(b) {
                Some(o) => o,
                // Arbitrary way to handle NaNs that should never happen
                None => Ordering::Equal,
            }
        }

        let mut v = self.to_vec().into_boxed_slice();
        v.sort_unstable_by(cmp);

        Percentiles::from_sorted(v)
    }

    /// Returns the standard deviation of the sample
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn std_dev(&self, mean: Option<A>) -> A {
        self.var(mean).sqrt()
    }

    /// Returns the standard error of the mean, `std_dev / sqrt(length)`
    ///
    /// - Time: `O(length)`
    pub fn std_err(&self, mean: Option<A>) -> A {
        self.std_dev(mean) / A::cast(self.len()).sqrt()
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::stats::sum(self)
    }

    /// Returns the unbiased (`n - 1` denominator) variance of the sample
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn var(&self, mean: Option<A>) -> A {
        use std::ops::Add;

        let mean = mean.unwrap_or_else(|| self.mean());
        let slice = self;

        let sum = slice
            .iter()
            .map(|&x| (x - mean).powi(2))
            .fold(A::cast(0), Add::add);

        sum / A::cast(slice.len() - 1)
    }

    #[cfg(test)]
    pub fn median(&self) -> A
    where
        usize: cast::From<A, Output = Result<usize, cast::Error>>,
    {
        self.percentiles().median()
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::stats::univariate::Sample;

            quickcheck! {
                fn mean_within_bounds(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]);
                        let mean = sample.mean();

                        TestResult::from_bool(
                            (mean > sample.min() || relative_eq!(mean, sample.min())) &&
                            (mean < sample.max() || relative_eq!(mean, sample.max()))
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn std_err_shrinks_std_dev(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]);
                        let mean = sample.mean();
                        let sd = sample.std_dev(Some(mean));
                        let se = sample.std_err(Some(mean));

                        TestResult::from_bool(se >= 0.0 && (se < sd || relative_eq!(se, sd)))
                    } else {
                        TestResult::discard()
                    }
                }
            }
        }
    };
}
