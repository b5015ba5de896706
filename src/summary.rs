//! Interval estimates derived from a bootstrap sampling distribution

use statrs::distribution::ContinuousCDF;

use crate::bootstrap::SamplingDistribution;
use crate::config;
use crate::error::{Error, Result};
use crate::estimate::ConfidenceInterval;
use crate::group_stats;
use crate::stats::Distribution;

/// How the interval is read off the sampling distribution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiMethod {
    /// `mean ± z * sd` of the resampled means
    NormalApproximation,
    /// Empirical `(1 - cl) / 2` and `(1 + cl) / 2` quantiles of the resampled means
    Percentile,
}

/// Bootstrap interval estimate of one group's mean
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CiEstimate {
    pub group: String,
    pub method: CiMethod,
    /// Mean of the resampled means; the same for both methods
    pub point_estimate: f64,
    /// Standard deviation of the resampled means
    pub standard_error: f64,
    pub confidence_interval: ConfidenceInterval,
}

/// Estimates every group's interval with `method`, in group order
///
/// Pure: summarizing the same distribution twice gives identical estimates.
pub fn summarize(
    distribution: &SamplingDistribution,
    confidence_level: f64,
    method: CiMethod,
) -> Result<Vec<CiEstimate>> {
    config::check_confidence_level(confidence_level)?;

    distribution
        .iter()
        .map(|(group, means)| estimate(group, means, confidence_level, method))
        .collect()
}

/// Normal-approximation and percentile estimates, in that order
pub fn summarize_all(
    distribution: &SamplingDistribution,
    confidence_level: f64,
) -> Result<(Vec<CiEstimate>, Vec<CiEstimate>)> {
    Ok((
        summarize(distribution, confidence_level, CiMethod::NormalApproximation)?,
        summarize(distribution, confidence_level, CiMethod::Percentile)?,
    ))
}

fn estimate(
    group: &str,
    means: &Distribution<f64>,
    cl: f64,
    method: CiMethod,
) -> Result<CiEstimate> {
    let point = means.mean();
    let se = means.standard_error();

    let (lower_bound, upper_bound) = match method {
        CiMethod::NormalApproximation => {
            // The spread of a single mean is undefined
            if means.len() < 2 {
                return Err(Error::DegenerateGroup {
                    group: group.to_owned(),
                    n: means.len(),
                });
            }

            let z = group_stats::standard_normal()?;
            let alpha = 1. - cl;

            (
                point + z.inverse_cdf(alpha / 2.) * se,
                point + z.inverse_cdf(1. - alpha / 2.) * se,
            )
        }
        CiMethod::Percentile => means.confidence_interval(cl),
    };

    Ok(CiEstimate {
        group: group.to_owned(),
        method,
        point_estimate: point,
        standard_error: se,
        confidence_interval: ConfidenceInterval {
            confidence_level: cl,
            lower_bound,
            upper_bound,
        },
    })
}
