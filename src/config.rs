//! Run configuration and command line parsing

use std::ffi::OsString;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use crate::bootstrap::EmptyGroupPolicy;
use crate::dataset::LoadOptions;
use crate::error::{Error, Result};

/// Checks that `cl` lies strictly between 0 and 1
pub(crate) fn check_confidence_level(cl: f64) -> Result<()> {
    if cl > 0. && cl < 1. {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "confidence level must be between 0 and 1 (exclusive), got {}",
            cl
        )))
    }
}

/// Parameters of an analysis
///
/// ```rust
/// use mean_ci::Config;
///
/// let config = Config::default()
///     .sample_size(200)
///     .nresamples(10_000)
///     .confidence_level(0.99)
///     .seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub sample_size: usize,
    pub nresamples: usize,
    pub confidence_level: f64,
    pub seed: Option<u64>,
    pub empty_group_policy: EmptyGroupPolicy,
}

impl Default for Config {
    /// Creates a configuration with the following defaults:
    ///
    /// - Sample size: 100
    /// - Bootstrap resamples: 1 000
    /// - Confidence level: 0.95
    /// - Seed: taken from the system clock
    /// - Empty group policy: fail
    fn default() -> Config {
        Config {
            sample_size: 100,
            nresamples: 1_000,
            confidence_level: 0.95,
            seed: None,
            empty_group_policy: EmptyGroupPolicy::Fail,
        }
    }
}

impl Config {
    /// Changes the number of observations drawn, without replacement, from the dataset to form
    /// the sample. Every bootstrap resample has this size too.
    pub fn sample_size(mut self, n: usize) -> Config {
        self.sample_size = n;
        self
    }

    /// Changes the number of bootstrap resamples
    ///
    /// More resamples give a smoother sampling distribution at a linear cost in time.
    pub fn nresamples(mut self, n: usize) -> Config {
        self.nresamples = n;
        self
    }

    /// Changes the confidence level of every interval
    pub fn confidence_level(mut self, cl: f64) -> Config {
        self.confidence_level = cl;
        self
    }

    /// Fixes the seed, making the whole analysis reproducible
    pub fn seed(mut self, seed: u64) -> Config {
        self.seed = Some(seed);
        self
    }

    /// Changes what the bootstrap does with resamples that miss a group
    pub fn empty_group_policy(mut self, policy: EmptyGroupPolicy) -> Config {
        self.empty_group_policy = policy;
        self
    }

    /// Checks every parameter, reporting the first one out of range
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(Error::InvalidConfiguration(
                "sample size must be positive".to_owned(),
            ));
        }
        if self.nresamples == 0 {
            return Err(Error::InvalidConfiguration(
                "the number of resamples must be positive".to_owned(),
            ));
        }
        check_confidence_level(self.confidence_level)?;
        if let EmptyGroupPolicy::Redraw { max_attempts: 0 } = self.empty_group_policy {
            return Err(Error::InvalidConfiguration(
                "redraw attempts must be positive".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Everything the `mean-ci` binary is told on its command line
#[derive(Clone, Debug, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub load_options: LoadOptions,
    /// Where to write the JSON reports; nothing is written if absent
    pub output_directory: Option<PathBuf>,
    pub config: Config,
    pub quiet: bool,
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mean-ci")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Theoretical and bootstrap confidence intervals of two group means")
        .arg(Arg::with_name("input")
            .help("CSV file holding the observations, with a header row.")
            .required(true)
            .index(1))
        .arg(Arg::with_name("group-column")
            .long("group-column")
            .takes_value(true)
            .default_value("PhysActive")
            .help("Column holding the two group labels."))
        .arg(Arg::with_name("value-column")
            .long("value-column")
            .takes_value(true)
            .default_value("Weight")
            .help("Column holding the measured values."))
        .arg(Arg::with_name("subject-column")
            .long("subject-column")
            .takes_value(true)
            .default_value("ID")
            .help("Column holding the subject identifiers."))
        .arg(Arg::with_name("age-column")
            .long("age-column")
            .takes_value(true)
            .default_value("Age")
            .help("Column holding the subject ages."))
        .arg(Arg::with_name("min-age")
            .long("min-age")
            .takes_value(true)
            .help("Drop subjects younger than this. [default: 18]"))
        .arg(Arg::with_name("all-ages")
            .long("all-ages")
            .conflicts_with("min-age")
            .help("Keep subjects of any age, including those with a missing age."))
        .arg(Arg::with_name("no-dedup")
            .long("no-dedup")
            .help("Keep every row, even when a subject appears more than once."))
        .arg(Arg::with_name("sample-size")
            .short("n")
            .long("sample-size")
            .takes_value(true)
            .help("Number of observations drawn from the dataset. [default: 100]"))
        .arg(Arg::with_name("nresamples")
            .short("b")
            .long("nresamples")
            .takes_value(true)
            .help("Number of bootstrap resamples. [default: 1000]"))
        .arg(Arg::with_name("confidence-level")
            .long("confidence-level")
            .takes_value(true)
            .help("Confidence level of the intervals. [default: 0.95]"))
        .arg(Arg::with_name("seed")
            .long("seed")
            .takes_value(true)
            .help("Seed of the random generator. [default: taken from the clock]"))
        .arg(Arg::with_name("empty-group")
            .long("empty-group")
            .takes_value(true)
            .possible_values(&["fail", "redraw"])
            .default_value("fail")
            .help("What to do with a resample that misses a group."))
        .arg(Arg::with_name("redraw-attempts")
            .long("redraw-attempts")
            .takes_value(true)
            .default_value("100")
            .help("Draws allowed per resample with --empty-group=redraw."))
        .arg(Arg::with_name("output-dir")
            .short("o")
            .long("output-dir")
            .takes_value(true)
            .help("Directory to write the JSON reports into."))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .help("Do not print the summary."))
}

/// Parses the process arguments, exiting with a usage message if they are malformed
pub fn parse_args() -> Result<Args> {
    from_matches(&app().get_matches())
}

/// Parses `args`, whose first item is the program name
pub fn try_parse_args_from<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app()
        .get_matches_from_safe(args)
        .map_err(|e| Error::InvalidConfiguration(e.message))?;

    from_matches(&matches)
}

fn parse<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    matches
        .value_of(name)
        .map(|s| {
            s.parse::<T>().map_err(|e| {
                Error::InvalidConfiguration(format!("invalid value {:?} for --{}: {}", s, name, e))
            })
        })
        .transpose()
}

fn from_matches(matches: &ArgMatches<'_>) -> Result<Args> {
    let mut config = Config::default();

    if let Some(n) = parse(matches, "sample-size")? {
        config = config.sample_size(n);
    }
    if let Some(n) = parse(matches, "nresamples")? {
        config = config.nresamples(n);
    }
    if let Some(cl) = parse(matches, "confidence-level")? {
        config = config.confidence_level(cl);
    }
    if let Some(seed) = parse(matches, "seed")? {
        config = config.seed(seed);
    }
    if matches.value_of("empty-group") == Some("redraw") {
        let max_attempts = parse(matches, "redraw-attempts")?.unwrap_or(100);
        config = config.empty_group_policy(EmptyGroupPolicy::Redraw { max_attempts });
    }
    config.validate()?;

    let defaults = LoadOptions::default();
    let column = |name: &str| matches.value_of(name).map(str::to_owned);
    let load_options = LoadOptions {
        subject_column: column("subject-column"),
        group_column: column("group-column").unwrap_or(defaults.group_column),
        value_column: column("value-column").unwrap_or(defaults.value_column),
        age_column: column("age-column"),
        min_age: if matches.is_present("all-ages") {
            None
        } else {
            parse(matches, "min-age")?.or(defaults.min_age)
        },
        deduplicate: !matches.is_present("no-dedup"),
    };

    Ok(Args {
        input: matches.value_of_os("input").map(PathBuf::from).unwrap_or_default(),
        load_options,
        output_directory: matches.value_of_os("output-dir").map(PathBuf::from),
        config,
        quiet: matches.is_present("quiet"),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Args> {
        try_parse_args_from(Some("mean-ci").into_iter().chain(args.iter().cloned()))
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.sample_size, 100);
        assert_eq!(config.nresamples, 1000);
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.seed, None);
        assert_eq!(config.empty_group_policy, EmptyGroupPolicy::Fail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range() {
        let configs = vec![
            Config::default().sample_size(0),
            Config::default().nresamples(0),
            Config::default().confidence_level(0.0),
            Config::default().confidence_level(1.0),
            Config::default().confidence_level(f64::NAN),
            Config::default().empty_group_policy(EmptyGroupPolicy::Redraw { max_attempts: 0 }),
        ];

        for config in configs {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn command_line_defaults() {
        let args = parse_args(&["nhanes.csv"]).unwrap();

        assert_eq!(args.input, PathBuf::from("nhanes.csv"));
        assert_eq!(args.load_options, LoadOptions::default());
        assert_eq!(args.output_directory, None);
        assert_eq!(args.config, Config::default());
        assert!(!args.quiet);
    }

    #[test]
    fn command_line_overrides() {
        let args = parse_args(&[
            "nhanes.csv",
            "-n",
            "250",
            "--nresamples=5000",
            "--confidence-level",
            "0.9",
            "--seed",
            "7",
            "--empty-group",
            "redraw",
            "--redraw-attempts",
            "10",
            "--value-column",
            "Height",
            "--all-ages",
            "--no-dedup",
            "-o",
            "out",
            "-q",
        ])
        .unwrap();

        assert_eq!(
            args.config,
            Config::default()
                .sample_size(250)
                .nresamples(5000)
                .confidence_level(0.9)
                .seed(7)
                .empty_group_policy(EmptyGroupPolicy::Redraw { max_attempts: 10 })
        );
        assert_eq!(args.load_options.value_column, "Height");
        assert_eq!(args.load_options.min_age, None);
        assert!(!args.load_options.deduplicate);
        assert_eq!(args.output_directory, Some(PathBuf::from("out")));
        assert!(args.quiet);
    }

    #[test]
    fn command_line_errors() {
        for args in &[
            &[][..],
            &["nhanes.csv", "--sample-size", "lots"][..],
            &["nhanes.csv", "--confidence-level", "95"][..],
            &["nhanes.csv", "--empty-group", "ignore"][..],
        ] {
            assert!(
                matches!(parse_args(args), Err(Error::InvalidConfiguration(_))),
                "{:?} should be rejected",
                args
            );
        }
    }
}
