//! The full comparison: draw a sample, estimate intervals four ways

use crate::bootstrap::{self, SamplingDistribution};
use crate::config::Config;
use crate::error::Result;
use crate::group_stats::{self, GroupSummary, Quantiles};
use crate::observation::Observations;
use crate::stats::rand_util;
use crate::summary::{self, CiEstimate};

/// Everything computed from one population
#[derive(Clone, Debug)]
pub struct Analysis {
    pub config: Config,
    /// Seed the run used, whether configured or taken from the clock
    pub seed: u64,
    pub population_size: usize,
    /// The observations drawn from the population
    pub sample: Observations,
    /// t intervals from the sample
    pub theoretical_sample: Vec<GroupSummary>,
    /// z intervals from the whole population
    pub theoretical_population: Vec<GroupSummary>,
    pub sampling_distribution: SamplingDistribution,
    pub bootstrap_normal: Vec<CiEstimate>,
    pub bootstrap_percentile: Vec<CiEstimate>,
}

/// Runs the analysis of `population`
///
/// Steps, in order, all driven by a single generator:
///
/// 1. draw `config.sample_size` observations without replacement
/// 2. t-based intervals of the sample's group means
/// 3. z-based intervals of the population's group means
/// 4. bootstrap the sample's group means `config.nresamples` times
/// 5. normal-approximation and percentile intervals from the bootstrap
pub fn analyze(population: &Observations, config: &Config) -> Result<Analysis> {
    config.validate()?;

    let (seed, mut rng) = match config.seed {
        Some(seed) => (seed, rand_util::seeded(seed)),
        None => rand_util::from_clock(),
    };
    info!("Analyzing {} observations with seed {}", population.len(), seed);

    let cl = config.confidence_level;
    let sample = elapsed!(
        "Drawing the sample",
        population.draw(config.sample_size, &mut rng)
    )?;
    let theoretical_sample = group_stats::summarize(&sample, cl, Quantiles::StudentT)?;
    let theoretical_population = group_stats::summarize(population, cl, Quantiles::Normal)?;
    let sampling_distribution = elapsed!(
        "Bootstrapping the group means",
        bootstrap::bootstrap(
            &sample,
            config.nresamples,
            config.empty_group_policy,
            &mut rng
        )
    )?;
    let (bootstrap_normal, bootstrap_percentile) = elapsed!(
        "Summarizing the sampling distribution",
        summary::summarize_all(&sampling_distribution, cl)
    )?;

    Ok(Analysis {
        config: config.clone(),
        seed,
        population_size: population.len(),
        sample,
        theoretical_sample,
        theoretical_population,
        sampling_distribution,
        bootstrap_normal,
        bootstrap_percentile,
    })
}
