//! Bootstrap sampling distribution of each group's mean
//!
//! Every iteration draws `N` observations with replacement from the sample (`N` being the size
//! of the sample), splits the draw by group and records each group's mean. After `B` iterations
//! every group holds exactly `B` means.
//!
//! Iteration `i` uses its own random stream, derived from a base seed taken from the caller's
//! generator and from `i` alone. The result is therefore the same whether the iterations run
//! sequentially or, with the `rayon` feature, in parallel.

use std::collections::BTreeMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::observation::Observations;
use crate::stats::rand_util::{self, Rng};
use crate::stats::univariate::Resamples;
use crate::stats::Distribution;

/// What to do when a resample contains no observation at all from some group
///
/// The mean of that group is undefined for the draw. Whatever the policy, a distribution is only
/// returned if all `B` draws are complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    /// Abort the whole bootstrap with `EmptyResampleGroup`
    Fail,
    /// Redraw the resample, from the same iteration's stream, up to `max_attempts` times in
    /// total before failing
    Redraw {
        /// Total number of draws allowed per iteration, at least 1
        max_attempts: usize,
    },
}

impl Default for EmptyGroupPolicy {
    fn default() -> EmptyGroupPolicy {
        EmptyGroupPolicy::Fail
    }
}

impl EmptyGroupPolicy {
    fn attempts(self) -> usize {
        match self {
            EmptyGroupPolicy::Fail => 1,
            EmptyGroupPolicy::Redraw { max_attempts } => max_attempts,
        }
    }
}

/// The per-group means of one bootstrap iteration
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResampleDraw {
    pub iteration: usize,
    pub means: BTreeMap<String, f64>,
}

/// `B` resampled means for each group
///
/// Immutable once built; the per-group distributions keep the iteration order.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingDistribution {
    groups: Box<[String]>,
    means: Box<[Distribution<f64>]>,
    sample_size: usize,
}

impl SamplingDistribution {
    /// Group labels, in order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Size of every resample, i.e. of the original sample
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Number of bootstrap iterations
    pub fn nresamples(&self) -> usize {
        self.means[0].len()
    }

    /// The resampled means of `group`
    pub fn group(&self, group: &str) -> Option<&Distribution<f64>> {
        self.groups
            .iter()
            .position(|g| g == group)
            .map(|i| &self.means[i])
    }

    /// `(group, resampled means)` pairs, in group order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution<f64>)> {
        self.groups.iter().map(String::as_str).zip(self.means.iter())
    }

    /// The means recorded by the `iteration`-th draw
    pub fn draw(&self, iteration: usize) -> Option<ResampleDraw> {
        if iteration >= self.nresamples() {
            return None;
        }

        Some(ResampleDraw {
            iteration,
            means: self
                .iter()
                .map(|(group, means)| (group.to_owned(), means[iteration]))
                .collect(),
        })
    }
}

/// Per-group vectors of means, filled in iteration order
struct Builder {
    means: Vec<Vec<f64>>,
}

impl Builder {
    fn new(ngroups: usize, size: usize) -> Builder {
        Builder {
            means: (0..ngroups).map(|_| Vec::with_capacity(size)).collect(),
        }
    }

    fn push(&mut self, draw: &[f64]) {
        for (means, &mean) in self.means.iter_mut().zip(draw) {
            means.push(mean);
        }
    }

    /// Append `other`'s means to these, leaving `other` empty
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    fn extend(&mut self, other: &mut Builder) {
        for (means, other) in self.means.iter_mut().zip(other.means.iter_mut()) {
            means.append(other);
        }
    }

    fn complete(self, groups: &[String], sample_size: usize) -> SamplingDistribution {
        SamplingDistribution {
            groups: groups.to_vec().into_boxed_slice(),
            means: self
                .means
                .into_iter()
                .map(|means| Distribution::from(means.into_boxed_slice()))
                .collect(),
            sample_size,
        }
    }
}

/// Everything one iteration needs; shared read-only between iterations
struct Resampler<'a> {
    coded: &'a [(usize, f64)],
    groups: &'a [String],
    base_seed: u128,
    policy: EmptyGroupPolicy,
}

impl<'a> Resampler<'a> {
    /// Group means of the `iteration`-th resample
    fn draw(
        &self,
        iteration: usize,
        resamples: &mut Resamples<'_, (usize, f64)>,
    ) -> Result<Vec<f64>> {
        let mut rng = rand_util::stream(self.base_seed, iteration as u64);
        let attempts = self.policy.attempts();
        let mut missing = 0;

        for attempt in 1..=attempts {
            match group_means(resamples.next(&mut rng), self.groups.len()) {
                Ok(means) => return Ok(means),
                Err(group) => {
                    missing = group;
                    info!(
                        "Resample #{} (attempt {}/{}) has no observations from group {:?}",
                        iteration, attempt, attempts, self.groups[group]
                    );
                }
            }
        }

        Err(Error::EmptyResampleGroup {
            group: self.groups[missing].clone(),
            iteration,
        })
    }
}

/// Means of each group in `resample`, or the index of the first group that is missing
fn group_means(
    resample: &[(usize, f64)],
    ngroups: usize,
) -> ::std::result::Result<Vec<f64>, usize> {
    let mut sums = vec![0.; ngroups];
    let mut counts = vec![0usize; ngroups];

    for &(group, value) in resample {
        sums[group] += value;
        counts[group] += 1;
    }

    match counts.iter().position(|&count| count == 0) {
        Some(group) => Err(group),
        None => Ok(sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| sum / count as f64)
            .collect()),
    }
}

/// Bootstraps the mean of each group of `sample`
///
/// `nresamples` is `B`; every resample has as many observations as `sample`. One base seed is
/// drawn from `rng`, so calling this twice with generators in the same state returns
/// bit-identical distributions.
///
/// - Multi-threaded with the `rayon` feature
/// - Time: `O(nresamples * sample.len())`
/// - Memory: `O(nresamples)`
pub fn bootstrap(
    sample: &Observations,
    nresamples: usize,
    policy: EmptyGroupPolicy,
    rng: &mut Rng,
) -> Result<SamplingDistribution> {
    if nresamples == 0 {
        return Err(Error::InvalidConfiguration(
            "the number of resamples must be positive".to_owned(),
        ));
    }
    if policy.attempts() == 0 {
        return Err(Error::InvalidConfiguration(
            "the empty group policy must allow at least one draw per resample".to_owned(),
        ));
    }

    let coded = sample.coded();
    let groups = sample.groups();
    let ngroups = groups.len();
    let resampler = Resampler {
        coded: &coded,
        groups,
        base_seed: rand_util::base_seed(rng),
        policy,
    };

    info!(
        "Drawing {} resamples of {} observations",
        nresamples,
        sample.len()
    );

    #[cfg(feature = "rayon")]
    {
        let builder = (0..nresamples)
            .into_par_iter()
            .try_fold(
                || (Resamples::new(resampler.coded), Builder::new(ngroups, 0)),
                |(mut resamples, mut builder), i| {
                    let means = resampler.draw(i, &mut resamples);

                    means.map(|means| {
                        builder.push(&means);
                        (resamples, builder)
                    })
                },
            )
            .map(|partial: Result<_>| partial.map(|(_, builder)| builder))
            .try_reduce(
                || Builder::new(ngroups, 0),
                |mut a, mut b| {
                    a.extend(&mut b);
                    Ok(a)
                },
            )?;

        Ok(builder.complete(groups, sample.len()))
    }
    #[cfg(not(feature = "rayon"))]
    {
        let mut resamples = Resamples::new(resampler.coded);
        let builder = (0..nresamples).try_fold(
            Builder::new(ngroups, nresamples),
            |mut builder, i| -> Result<Builder> {
                builder.push(&resampler.draw(i, &mut resamples)?);
                Ok(builder)
            },
        )?;

        Ok(builder.complete(groups, sample.len()))
    }
}
