//! Confidence intervals for the mean of two groups.
//!
//! Given a dataset of observations split into two groups (for example, adults who are or are
//! not physically active, with their weight as the value), `mean-ci` estimates an interval for
//! each group's mean in four ways:
//!
//! - from a fixed-size sample, with Student's t critical values
//! - from the whole dataset treated as the population, with standard normal critical values
//! - by bootstrapping the sample, then reading the interval off the sampling distribution with
//!   a normal approximation
//! - by bootstrapping the sample, then taking percentiles of the sampling distribution
//!
//! ## Features:
//! * Reproducible: all randomness comes from an explicit, seedable generator
//! * Parallel bootstrap (with the default `rayon` feature) giving the same results as the
//!   sequential one
//! * JSON reports and a terminal summary
//!
//! ```rust
//! use mean_ci::{analyze, Config, Observation, Observations};
//!
//! let population = Observations::new(
//!     (0..1000)
//!         .map(|i| {
//!             let group = if i % 2 == 0 { "Yes" } else { "No" };
//!             Observation::new(group, 70.0 + (i % 13) as f64)
//!         })
//!         .collect(),
//! )
//! .unwrap();
//!
//! let analysis = analyze(&population, &Config::default().seed(42)).unwrap();
//!
//! for estimate in &analysis.bootstrap_percentile {
//!     println!("{}: {}", estimate.group, estimate.confidence_interval);
//! }
//! ```

#![warn(bare_trait_objects)]
#![cfg_attr(
    feature = "cargo-clippy",
    allow(
        clippy::just_underscores_and_digits, // Used in the stats code
        clippy::transmute_ptr_to_ptr, // Used in the stats code
    )
)]

#[cfg(test)]
extern crate approx;

#[cfg(test)]
extern crate quickcheck;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

// Needs to be declared before other modules
// in order to be usable there.
#[macro_use]
mod macros_private;

pub mod analysis;
pub mod bootstrap;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod group_stats;
pub mod observation;
pub mod report;
pub mod stats;
pub mod summary;

mod format;
mod fs;

pub use crate::analysis::{analyze, Analysis};
pub use crate::bootstrap::{bootstrap, EmptyGroupPolicy, SamplingDistribution};
pub use crate::config::Config;
pub use crate::dataset::LoadOptions;
pub use crate::error::{Error, Result};
pub use crate::estimate::ConfidenceInterval;
pub use crate::group_stats::{GroupSummary, Quantiles};
pub use crate::observation::{Observation, Observations};
pub use crate::summary::{CiEstimate, CiMethod};

lazy_static! {
    static ref DEBUG_ENABLED: bool = std::env::var_os("MEAN_CI_DEBUG").is_some();
}

fn debug_enabled() -> bool {
    *DEBUG_ENABLED
}
