use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use serde_json::value::Value;
use tempfile::{tempdir, TempDir};

use mean_ci::config;
use mean_ci::dataset;
use mean_ci::group_stats::{self, Quantiles};
use mean_ci::report::{self, CliReport};
use mean_ci::stats::rand_util;
use mean_ci::summary::{self, CiMethod};
use mean_ci::{analyze, bootstrap, Config, EmptyGroupPolicy, Error, Observation, Observations};

/*
 * A small NHANES-shaped dataset: one row per subject, with a few rows that the default
 * filters drop (minors, missing weights, repeated subjects).
 */
fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("nhanes.csv");
    let mut f = File::create(&path).unwrap();
    let mut rng = rand_util::seeded(2024);

    writeln!(f, "ID,Gender,Age,PhysActive,Weight").unwrap();
    for id in 0..400 {
        let age = 10 + id % 70;
        let active = id % 5 < 3;
        let base = if active { 76. } else { 84. };
        let weight = base + 30. * (rng.rand_float() - 0.5);
        let weight = if id % 37 == 0 {
            "NA".to_owned()
        } else {
            format!("{:.1}", weight)
        };
        let gender = if id % 2 == 0 { "female" } else { "male" };
        let line = format!(
            "{},{},{},{},{}",
            id,
            gender,
            age,
            if active { "Yes" } else { "No" },
            weight
        );

        writeln!(f, "{}", line).unwrap();
        if id % 50 == 0 {
            writeln!(f, "{}", line).unwrap();
        }
    }

    path
}

fn scenario() -> Observations {
    let a = [70.0, 72.0, 74.0, 76.0, 78.0].iter().map(|&v| Observation::new("A", v));
    let b = [60.0, 62.0, 64.0, 66.0, 68.0].iter().map(|&v| Observation::new("B", v));

    Observations::new(a.chain(b).collect()).unwrap()
}

fn verify_json(dir: &Path, path: &str) -> Value {
    let full_path = dir.join(path);
    assert!(
        full_path.is_file(),
        "File {:?} does not exist or is not a file",
        full_path
    );
    let f = File::open(full_path).unwrap();
    serde_json::from_reader::<File, Value>(f).unwrap()
}

#[test]
fn scenario_means_and_single_resample() {
    let sample = scenario();
    let summaries = group_stats::summarize(&sample, 0.95, Quantiles::StudentT).unwrap();

    assert_relative_eq!(summaries[0].mean, 74.0);
    assert_relative_eq!(summaries[1].mean, 64.0);

    let policy = EmptyGroupPolicy::Redraw { max_attempts: 1000 };
    let distribution = bootstrap(&sample, 1, policy, &mut rand_util::seeded(5)).unwrap();
    let percentile = summary::summarize(&distribution, 0.95, CiMethod::Percentile).unwrap();

    assert_eq!(distribution.nresamples(), 1);
    assert_eq!(percentile.len(), 2);
}

#[test]
fn t_wider_than_z_on_the_same_data() {
    let sample = scenario();
    let t = group_stats::summarize(&sample, 0.95, Quantiles::StudentT).unwrap();
    let z = group_stats::summarize(&sample, 0.95, Quantiles::Normal).unwrap();

    for (t, z) in t.iter().zip(&z) {
        assert_eq!(t.mean, z.mean);
        assert!(t.confidence_interval.width() > z.confidence_interval.width());
    }
}

#[test]
fn thousand_resamples_are_reproducible() {
    let dir = tempdir().unwrap();
    let population = dataset::load(&write_dataset(&dir), &Default::default()).unwrap();
    let config = Config::default().sample_size(100).nresamples(1000).seed(42);

    let first = analyze(&population, &config).unwrap();
    let second = analyze(&population, &config).unwrap();

    for (_, means) in first.sampling_distribution.iter() {
        assert_eq!(means.len(), 1000);
    }
    assert_eq!(first.sampling_distribution, second.sampling_distribution);
    assert_eq!(first.bootstrap_normal, second.bootstrap_normal);
    assert_eq!(first.bootstrap_percentile, second.bootstrap_percentile);
}

#[test]
fn intervals_hold_their_point_estimates() {
    let dir = tempdir().unwrap();
    let population = dataset::load(&write_dataset(&dir), &Default::default()).unwrap();
    let analysis = analyze(&population, &Config::default().seed(7)).unwrap();

    for s in analysis.theoretical_sample.iter().chain(&analysis.theoretical_population) {
        assert!(s.confidence_interval.contains(s.mean));
    }
    for e in analysis.bootstrap_normal.iter().chain(&analysis.bootstrap_percentile) {
        let means = analysis.sampling_distribution.group(&e.group).unwrap();

        assert!(e.confidence_interval.contains(e.point_estimate));
        if e.method == CiMethod::Percentile {
            assert!(means.min() <= e.confidence_interval.lower_bound);
            assert!(e.confidence_interval.upper_bound <= means.max());
        }
    }
}

#[test]
fn command_line_run_writes_reports() {
    let dir = tempdir().unwrap();
    let input = write_dataset(&dir);
    let output = dir.path().join("out");

    let args = config::try_parse_args_from(vec![
        OsStr::new("mean-ci"),
        input.as_os_str(),
        OsStr::new("--seed"),
        OsStr::new("1"),
        OsStr::new("--nresamples"),
        OsStr::new("200"),
        OsStr::new("--output-dir"),
        output.as_os_str(),
    ])
    .unwrap();

    let population = dataset::load(&args.input, &args.load_options).unwrap();
    let analysis = analyze(&population, &args.config).unwrap();
    report::save(&analysis, args.output_directory.as_ref().unwrap()).unwrap();

    for file in &report::FILES {
        verify_json(&output, file);
    }

    let normal = verify_json(&output, "bootstrap_normal.json");
    assert_eq!(normal[0]["group"], "No");
    assert_eq!(normal[0]["method"], "normal_approximation");
    assert_eq!(normal[1]["group"], "Yes");

    let record = verify_json(&output, "analysis.json");
    assert_eq!(record["seed"], 1);
    assert_eq!(record["config"]["nresamples"], 200);
    assert_eq!(record["config"]["empty_group_policy"], "fail");
    assert_eq!(record["sample"].as_array().unwrap().len(), 100);

    let summary = CliReport::new(false).summary(&analysis);
    assert!(summary.contains("bootstrap pctl:"));
}

#[test]
fn too_few_observations_for_the_sample() {
    let dir = tempdir().unwrap();
    let population = dataset::load(&write_dataset(&dir), &Default::default()).unwrap();
    let config = Config::default().sample_size(population.len() + 1).seed(0);

    assert!(matches!(
        analyze(&population, &config),
        Err(Error::InvalidConfiguration(_))
    ));
}
