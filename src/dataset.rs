//! Loading observations from a CSV file
//!
//! The file needs a header row. Only the configured columns are read; any other column is
//! ignored. Rows are filtered as follows, in order:
//!
//! - rows whose group or value is missing (empty, `NA`, `NaN` or `null`) or whose value is not
//!   a number are dropped
//! - with a minimum age, rows with a missing age or an age below the minimum are dropped
//! - with de-duplication, only the first row of each subject is kept

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Error, Result};
use crate::observation::{Observation, Observations};

const MISSING: &[&str] = &["", "NA", "NaN", "nan", "null", "NULL"];

/// Column names and row filters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Subject identifier column, needed for de-duplication. Defaults to `ID`.
    pub subject_column: Option<String>,
    /// Two-level group column. Defaults to `PhysActive`.
    pub group_column: String,
    /// Numeric value column. Defaults to `Weight`.
    pub value_column: String,
    /// Age column, needed for `min_age`. Defaults to `Age`.
    pub age_column: Option<String>,
    /// Rows younger than this are dropped. Defaults to 18.
    pub min_age: Option<f64>,
    /// Keep only the first row of each subject. Defaults to true.
    pub deduplicate: bool,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions {
            subject_column: Some("ID".to_owned()),
            group_column: "PhysActive".to_owned(),
            value_column: "Weight".to_owned(),
            age_column: Some("Age".to_owned()),
            min_age: Some(18.0),
            deduplicate: true,
        }
    }
}

impl LoadOptions {
    fn validate(&self) -> Result<()> {
        if self.min_age.is_some() && self.age_column.is_none() {
            return Err(Error::InvalidConfiguration(
                "a minimum age needs an age column".to_owned(),
            ));
        }
        if self.deduplicate && self.subject_column.is_none() {
            return Err(Error::InvalidConfiguration(
                "de-duplication needs a subject column".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Positions of the configured columns in the header
struct Columns {
    subject: Option<usize>,
    group: usize,
    value: usize,
    age: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord, options: &LoadOptions) -> Result<Columns> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                Error::InvalidData(format!("column {:?} not found in the header", name))
            })
        };

        Ok(Columns {
            subject: options.subject_column.as_deref().map(find).transpose()?,
            group: find(&options.group_column)?,
            value: find(&options.value_column)?,
            age: match options.min_age {
                Some(_) => options.age_column.as_deref().map(find).transpose()?,
                None => None,
            },
        })
    }
}

/// Rows dropped by each filter
#[derive(Debug, Default)]
struct Dropped {
    missing: usize,
    underage: usize,
    duplicate: usize,
}

fn field<'r>(record: &'r StringRecord, i: usize) -> Option<&'r str> {
    record.get(i).filter(|s| !MISSING.contains(s))
}

/// Loads the observations in the CSV file at `path`
pub fn load(path: &Path, options: &LoadOptions) -> Result<Observations> {
    let file = File::open(path).map_err(|inner| Error::AccessError {
        inner,
        path: path.to_owned(),
    })?;

    read(file, path, options)
}

/// Reads observations from CSV data; `source` only names the data in errors
pub fn read<R: Read>(reader: R, source: &Path, options: &LoadOptions) -> Result<Observations> {
    options.validate()?;

    let csv_error = |inner| Error::CsvError {
        inner,
        path: source.to_owned(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = Columns::locate(reader.headers().map_err(csv_error)?, options)?;

    let mut observations = vec![];
    let mut subjects = HashSet::new();
    let mut dropped = Dropped::default();
    let mut rows = 0;

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows += 1;

        let group = field(&record, columns.group);
        let value = field(&record, columns.value).and_then(|v| v.parse::<f64>().ok());
        let (group, value) = match (group, value) {
            (Some(group), Some(value)) if value.is_finite() => (group, value),
            _ => {
                dropped.missing += 1;
                continue;
            }
        };

        if let (Some(min_age), Some(i)) = (options.min_age, columns.age) {
            let age = field(&record, i).and_then(|a| a.parse::<f64>().ok());
            if age.map_or(true, |age| age < min_age) {
                dropped.underage += 1;
                continue;
            }
        }

        let subject = columns.subject.and_then(|i| field(&record, i));
        if options.deduplicate {
            if let Some(subject) = subject {
                if !subjects.insert(subject.to_owned()) {
                    dropped.duplicate += 1;
                    continue;
                }
            }
        }

        let observation = Observation::new(group, value);
        observations.push(match subject {
            Some(subject) => observation.with_subject(subject),
            None => observation,
        });
    }

    info!(
        "Read {} rows from {:?}: kept {}, dropped {:?}",
        rows,
        source,
        observations.len(),
        dropped
    );

    Observations::new(observations)
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::*;

    const NHANES: &str = "\
ID,Age,PhysActive,Weight
1,34,Yes,87.4
1,34,Yes,87.4
2,16,No,60.2
3,49,No,
4,45,NA,75.7
5,NA,Yes,80.0
6,60,No,92.1
7,19,Yes,63.5
8,72,No,abc
";

    fn read_str(data: &str, options: &LoadOptions) -> Result<Observations> {
        read(data.as_bytes(), Path::new("nhanes.csv"), options)
    }

    #[test]
    fn default_filters() {
        let observations = read_str(NHANES, &LoadOptions::default()).unwrap();
        let subjects: Vec<_> = observations
            .iter()
            .map(|o| o.subject.as_deref().unwrap())
            .collect();

        assert_eq!(subjects, vec!["1", "6", "7"]);
        assert_eq!(observations.groups(), ["No", "Yes"]);
        assert_eq!(observations.partition()["Yes"], vec![87.4, 63.5]);
    }

    #[test]
    fn without_age_filter_or_dedup() {
        let options = LoadOptions {
            min_age: None,
            deduplicate: false,
            ..LoadOptions::default()
        };
        let observations = read_str(NHANES, &options).unwrap();

        // 1, 1, 2, 5, 6, 7
        assert_eq!(observations.len(), 6);
    }

    #[test]
    fn custom_columns() {
        let data = "grp , val\n a , 1.5\n b , 2.5\n a , 3.5\n";
        let options = LoadOptions {
            subject_column: None,
            group_column: "grp".to_owned(),
            value_column: "val".to_owned(),
            age_column: None,
            min_age: None,
            deduplicate: false,
        };
        let observations = read_str(data, &options).unwrap();

        assert_eq!(observations.partition()["a"], vec![1.5, 3.5]);
        assert!(observations.iter().all(|o| o.subject.is_none()));
    }

    #[test]
    fn missing_column() {
        let options = LoadOptions {
            value_column: "BMI".to_owned(),
            ..LoadOptions::default()
        };

        match read_str(NHANES, &options) {
            Err(Error::InvalidData(msg)) => assert!(msg.contains("BMI")),
            other => panic!("expected InvalidData, got {:?}", other),
        }
    }

    #[test]
    fn inconsistent_options() {
        let options = LoadOptions {
            age_column: None,
            ..LoadOptions::default()
        };

        assert!(matches!(
            read_str(NHANES, &options),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn single_group_left() {
        let data = "ID,Age,PhysActive,Weight\n1,30,Yes,70\n2,12,No,40\n";

        assert!(matches!(
            read_str(data, &LoadOptions::default()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load(Path::new("does/not/exist.csv"), &LoadOptions::default()),
            Err(Error::AccessError { .. })
        ));
    }
}
