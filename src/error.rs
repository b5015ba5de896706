//! Error types

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use csv::Error as CsvError;
use serde_json::Error as SerdeError;

/// Everything that can go wrong while loading data or estimating intervals
#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub enum Error {
    /// A group has fewer than two values, so its standard error is undefined
    DegenerateGroup {
        /// Label of the offending group
        group: String,
        /// Number of values the group had
        n: usize,
    },
    /// A bootstrap draw contained no observations from one of the groups
    EmptyResampleGroup {
        /// Label of the missing group
        group: String,
        /// Zero-based index of the bootstrap iteration
        iteration: usize,
    },
    /// A configuration value is out of range
    InvalidConfiguration(String),
    /// The input observations do not describe a two-group comparison
    InvalidData(String),
    /// A file could not be opened, created or written
    AccessError {
        /// File that was accessed
        path: PathBuf,
        /// Underlying I/O error
        inner: io::Error,
    },
    /// A CSV file could not be parsed
    CsvError {
        /// File that was parsed
        path: PathBuf,
        /// Underlying CSV error
        inner: CsvError,
    },
    /// A JSON document could not be written
    SerdeError {
        /// File that was written
        path: PathBuf,
        /// Underlying serialization error
        inner: SerdeError,
    },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateGroup { group, n } => write!(
                f,
                "Group {:?} has {} observation(s); at least 2 are needed to estimate its standard error",
                group, n
            ),
            Error::EmptyResampleGroup { group, iteration } => write!(
                f,
                "Bootstrap resample #{} contains no observations from group {:?}",
                iteration, group
            ),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Error::AccessError { path, inner } => {
                write!(f, "Failed to access file {:?}: {}", path, inner)
            }
            Error::CsvError { path, inner } => {
                write!(f, "Failed to read CSV file {:?}: {}", path, inner)
            }
            Error::SerdeError { path, inner } => write!(
                f,
                "Failed to read or write file {:?} due to serialization error: {}",
                path, inner
            ),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::DegenerateGroup { .. }
            | Error::EmptyResampleGroup { .. }
            | Error::InvalidConfiguration(_)
            | Error::InvalidData(_) => None,
            Error::AccessError { inner, .. } => Some(inner),
            Error::CsvError { inner, .. } => Some(inner),
            Error::SerdeError { inner, .. } => Some(inner),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = ::std::result::Result<T, Error>;

/// Prints `e` to stderr
pub fn log_error(e: &Error) {
    error!("error: {}", e);
}
