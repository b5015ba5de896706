//! Theoretical confidence intervals of each group's mean
//!
//! The standard error is estimated from the data (`sd / sqrt(n)`) and scaled by critical values
//! taken either from Student's t distribution (the data is one finite sample) or from the
//! standard normal distribution (the data is the whole population).

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::config;
use crate::error::{Error, Result};
use crate::estimate::ConfidenceInterval;
use crate::observation::Observations;
use crate::stats::univariate::Sample;

/// Source of the critical values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantiles {
    /// Student's t distribution with `n - 1` degrees of freedom
    StudentT,
    /// The standard normal distribution
    Normal,
}

impl Quantiles {
    /// Returns the two-sided critical values `(lower, upper)` at `confidence_level` for a
    /// statistic estimated from `n` values
    ///
    /// `lower` is the `(1 - cl) / 2` quantile and `upper` the `(1 + cl) / 2` quantile, so
    /// `lower < 0 < upper`.
    pub fn critical_values(self, n: usize, confidence_level: f64) -> Result<(f64, f64)> {
        let alpha = 1. - confidence_level;
        let (p_lo, p_hi) = (alpha / 2., 1. - alpha / 2.);

        match self {
            Quantiles::StudentT => {
                let df = n.saturating_sub(1) as f64;
                let t = StudentsT::new(0., 1., df).map_err(|e| {
                    Error::InvalidConfiguration(format!(
                        "t distribution with {} degrees of freedom: {}",
                        df, e
                    ))
                })?;

                Ok((t.inverse_cdf(p_lo), t.inverse_cdf(p_hi)))
            }
            Quantiles::Normal => {
                let z = standard_normal()?;

                Ok((z.inverse_cdf(p_lo), z.inverse_cdf(p_hi)))
            }
        }
    }
}

pub(crate) fn standard_normal() -> Result<Normal> {
    Normal::new(0., 1.)
        .map_err(|e| Error::InvalidConfiguration(format!("standard normal distribution: {}", e)))
}

/// Closed-form interval estimate of one group's mean
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: String,
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation over `sqrt(n)`
    pub standard_error: f64,
    pub quantiles: Quantiles,
    pub confidence_interval: ConfidenceInterval,
}

/// Summarizes every group of `observations`, in group order
///
/// Fails with `DegenerateGroup` if some group has fewer than two observations.
pub fn summarize(
    observations: &Observations,
    confidence_level: f64,
    quantiles: Quantiles,
) -> Result<Vec<GroupSummary>> {
    config::check_confidence_level(confidence_level)?;

    observations
        .partition()
        .into_iter()
        .map(|(group, values)| summarize_group(group, &values, confidence_level, quantiles))
        .collect()
}

/// Summarizes the values of a single group
pub fn summarize_group(
    group: &str,
    values: &[f64],
    confidence_level: f64,
    quantiles: Quantiles,
) -> Result<GroupSummary> {
    config::check_confidence_level(confidence_level)?;

    let n = values.len();

    if values.iter().any(|x| x.is_nan()) {
        return Err(Error::InvalidData(format!(
            "group {:?} contains NaN values",
            group
        )));
    }

    if n < 2 {
        return Err(Error::DegenerateGroup {
            group: group.to_owned(),
            n,
        });
    }

    let sample = Sample::new(values);
    let mean = sample.mean();
    let se = sample.std_err(Some(mean));
    let (lo, hi) = quantiles.critical_values(n, confidence_level)?;

    Ok(GroupSummary {
        group: group.to_owned(),
        n,
        mean,
        standard_error: se,
        quantiles,
        confidence_interval: ConfidenceInterval {
            confidence_level,
            lower_bound: mean + lo * se,
            upper_bound: mean + hi * se,
        },
    })
}
