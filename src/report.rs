//! JSON reports and the terminal summary

use std::fmt::Write;
use std::path::Path;

use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};

use crate::analysis::Analysis;
use crate::bootstrap::SamplingDistribution;
use crate::config::Config;
use crate::error::Result;
use crate::estimate::ConfidenceInterval;
use crate::format;
use crate::fs;
use crate::observation::Observation;

/// Files written by [`save`], in writing order
pub const FILES: [&str; 6] = [
    "theoretical_sample.json",
    "theoretical_population.json",
    "sampling_distribution.json",
    "bootstrap_normal.json",
    "bootstrap_percentile.json",
    "analysis.json",
];

#[derive(Debug, Serialize)]
struct GroupMeans<'a> {
    group: &'a str,
    min: f64,
    max: f64,
    quartiles: (f64, f64, f64),
    means: &'a [f64],
}

#[derive(Debug, Serialize)]
struct SamplingDistributionRecord<'a> {
    sample_size: usize,
    nresamples: usize,
    groups: Vec<GroupMeans<'a>>,
}

impl<'a> SamplingDistributionRecord<'a> {
    fn new(distribution: &'a SamplingDistribution) -> SamplingDistributionRecord<'a> {
        SamplingDistributionRecord {
            sample_size: distribution.sample_size(),
            nresamples: distribution.nresamples(),
            groups: distribution
                .iter()
                .map(|(group, means)| GroupMeans {
                    group,
                    min: means.min(),
                    max: means.max(),
                    quartiles: means.percentiles().quartiles(),
                    means,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalysisRecord<'a> {
    config: &'a Config,
    seed: u64,
    population_size: usize,
    groups: &'a [String],
    sample: Vec<&'a Observation>,
}

/// Writes every part of `analysis` as pretty JSON under `dir`, creating it if needed
pub fn save(analysis: &Analysis, dir: &Path) -> Result<()> {
    fs::mkdirp(&dir)?;

    let [sample, population, distribution, normal, percentile, record] = FILES;
    fs::save(&analysis.theoretical_sample, &dir.join(sample))?;
    fs::save(&analysis.theoretical_population, &dir.join(population))?;
    fs::save(
        &SamplingDistributionRecord::new(&analysis.sampling_distribution),
        &dir.join(distribution),
    )?;
    fs::save(&analysis.bootstrap_normal, &dir.join(normal))?;
    fs::save(&analysis.bootstrap_percentile, &dir.join(percentile))?;
    fs::save(
        &AnalysisRecord {
            config: &analysis.config,
            seed: analysis.seed,
            population_size: analysis.population_size,
            groups: analysis.sample.groups(),
            sample: analysis.sample.iter().collect(),
        },
        &dir.join(record),
    )?;

    info!("Saved {} reports to {:?}", FILES.len(), dir);
    Ok(())
}

/// Prints the intervals of an analysis, one `[lower point upper]` line per group and method
pub struct CliReport {
    pub enable_text_coloring: bool,
}

impl CliReport {
    pub fn new(enable_text_coloring: bool) -> CliReport {
        CliReport {
            enable_text_coloring,
        }
    }

    /// Colors the output when stdout is a terminal
    pub fn for_stdout() -> CliReport {
        CliReport::new(atty::is(atty::Stream::Stdout))
    }

    fn green(&self, s: &str) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetForegroundColor(Color::DarkGreen), s, ResetAttributes)
        } else {
            String::from(s)
        }
    }

    fn bold(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Bold), s, ResetAttributes)
        } else {
            s
        }
    }

    fn faint(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Faint), s, ResetAttributes)
        } else {
            s
        }
    }

    fn interval(&self, label: &str, point: f64, ci: &ConfidenceInterval) -> String {
        format!(
            "{}{:<18}[{} {} {}]",
            " ".repeat(12),
            label,
            self.faint(format::value(ci.lower_bound)),
            self.bold(format::value(point)),
            self.faint(format::value(ci.upper_bound))
        )
    }

    /// The summary as printed by [`print`](CliReport::print)
    pub fn summary(&self, analysis: &Analysis) -> String {
        let config = &analysis.config;
        let mut out = String::new();

        // Writing into a `String` cannot fail
        let _ = writeln!(
            out,
            "Sample of {} out of {} observations, {} resamples, {} CI, seed {}",
            format::integer(analysis.sample.len()),
            format::integer(analysis.population_size),
            format::integer(analysis.sampling_distribution.nresamples()),
            format::level(config.confidence_level),
            analysis.seed
        );

        for (i, group) in analysis.sample.groups().iter().enumerate() {
            let t = &analysis.theoretical_sample[i];
            let z = &analysis.theoretical_population[i];
            let normal = &analysis.bootstrap_normal[i];
            let percentile = &analysis.bootstrap_percentile[i];

            let _ = writeln!(out, "{} (n = {})", self.green(group), t.n);
            let lines = [
                self.interval("t, sample:", t.mean, &t.confidence_interval),
                self.interval("z, population:", z.mean, &z.confidence_interval),
                self.interval(
                    "bootstrap normal:",
                    normal.point_estimate,
                    &normal.confidence_interval,
                ),
                self.interval(
                    "bootstrap pctl:",
                    percentile.point_estimate,
                    &percentile.confidence_interval,
                ),
            ];
            for line in &lines {
                let _ = writeln!(out, "{}", line);
            }
        }

        out
    }

    pub fn print(&self, analysis: &Analysis) {
        print!("{}", self.summary(analysis));
    }
}
