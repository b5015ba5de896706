use std::cmp;

use crate::stats::float::Float;
use cast::usize;

/// A "view" into the percentiles of a sample
///
/// Percentiles between two order statistics are interpolated linearly: with `n` sorted values
/// `x[0] <= .. <= x[n - 1]`, the `p`-th percentile sits at rank `r = p / 100 * (n - 1)` and
/// equals `x[floor(r)] + (x[floor(r) + 1] - x[floor(r)]) * fract(r)`. This is the
/// Hyndman & Fan "type 7" estimator.
pub struct Percentiles<A>(Box<[A]>)
where
    A: Float;

impl<A> Percentiles<A>
where
    A: Float,
    usize: cast::From<A, Output = Result<usize, cast::Error>>,
{
    /// Wraps values that are already sorted in ascending order
    pub(crate) fn from_sorted(sorted: Box<[A]>) -> Percentiles<A> {
        debug_assert!(!sorted.is_empty());
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        Percentiles(sorted)
    }

    /// Returns the percentile at `p`%
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the closed `[0, 100]` range
    pub fn at(&self, p: A) -> A {
        let _0 = A::cast(0);
        let _100 = A::cast(100);

        assert!(p >= _0 && p <= _100);
        assert!(!self.0.is_empty());

        let last = self.0.len() - 1;

        if p == _100 || last == 0 {
            return self.0[last];
        }

        let rank = (p / _100) * A::cast(last);
        let integer = rank.floor();
        let fraction = rank - integer;
        // `rank` is finite and within `[0, last]`, so the cast cannot fail
        let n = cmp::min(usize(integer).unwrap_or(last), last);
        let floor = self.0[n];
        let ceiling = self.0[cmp::min(n + 1, last)];

        floor + (ceiling - floor) * fraction
    }

    /// Returns the 50th percentile
    pub fn median(&self) -> A {
        self.at(A::cast(50))
    }

    /// Returns the 25th, 50th and 75th percentiles
    pub fn quartiles(&self) -> (A, A, A) {
        (
            self.at(A::cast(25)),
            self.at(A::cast(50)),
            self.at(A::cast(75)),
        )
    }
}
