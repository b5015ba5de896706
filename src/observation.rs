//! Observations and their partition by group

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::stats::rand_util::Rng;

/// Number of groups a comparison is made of
pub const GROUPS: usize = 2;

/// One subject record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Subject identifier, if the source has one
    pub subject: Option<String>,
    /// Group label, e.g. `"Yes"`/`"No"` for physical activity
    pub group: String,
    /// Measured value, e.g. weight
    pub value: f64,
}

impl Observation {
    pub fn new<G: Into<String>>(group: G, value: f64) -> Observation {
        Observation {
            subject: None,
            group: group.into(),
            value,
        }
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Observation {
        self.subject = Some(subject.into());
        self
    }
}

/// An immutable collection of observations spanning exactly two groups
///
/// Used both for a fixed-size sample and for the full dataset when it is treated as the
/// population. Groups are kept in lexicographic order of their labels; every per-group output
/// of the crate follows that order.
#[derive(Clone, Debug, PartialEq)]
pub struct Observations {
    observations: Box<[Observation]>,
    groups: Box<[String]>,
}

impl Observations {
    /// Validates and wraps `observations`
    ///
    /// Fails with `InvalidData` if there are no observations, if any value is not finite or
    /// if the observations do not span exactly two groups.
    pub fn new(observations: Vec<Observation>) -> Result<Observations> {
        if observations.is_empty() {
            return Err(Error::InvalidData("no observations".to_owned()));
        }

        if let Some(bad) = observations.iter().find(|o| !o.value.is_finite()) {
            return Err(Error::InvalidData(format!(
                "non-finite value {} in group {:?}",
                bad.value, bad.group
            )));
        }

        let groups = observations
            .iter()
            .map(|o| o.group.as_str())
            .unique()
            .sorted()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        if groups.len() != GROUPS {
            return Err(Error::InvalidData(format!(
                "expected exactly {} groups, found {}: [{}]",
                GROUPS,
                groups.len(),
                groups.iter().map(|g| format!("{:?}", g)).join(", ")
            )));
        }

        Ok(Observations {
            observations: observations.into_boxed_slice(),
            groups: groups.into_boxed_slice(),
        })
    }

    /// Group labels, in order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always `false`; kept for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Maps each group label to its values, in input order
    pub fn partition(&self) -> BTreeMap<&str, Vec<f64>> {
        self.observations
            .iter()
            .map(|o| (o.group.as_str(), o.value))
            .into_group_map()
            .into_iter()
            .collect()
    }

    /// `(group index, value)` pairs, the compact form the bootstrap resamples
    pub(crate) fn coded(&self) -> Vec<(usize, f64)> {
        self.observations
            .iter()
            .map(|o| {
                let code = self
                    .groups
                    .binary_search(&o.group)
                    .unwrap_or_else(|_| unreachable!("groups are collected from observations"));

                (code, o.value)
            })
            .collect()
    }

    /// Draws `n` observations without replacement
    ///
    /// This is how the fixed-size sample is taken from the full dataset. Fails with
    /// `InvalidConfiguration` if `n` is zero or larger than the number of observations, and
    /// with `InvalidData` if the draw happens to miss a group entirely.
    pub fn draw(&self, n: usize, rng: &mut Rng) -> Result<Observations> {
        let len = self.len();

        if n == 0 || n > len {
            return Err(Error::InvalidConfiguration(format!(
                "sample size must be in 1..={} (the number of observations), got {}",
                len, n
            )));
        }

        // Partial Fisher-Yates: the first `n` slots end up holding a uniform draw
        let mut indices: Vec<usize> = (0..len).collect();
        for i in 0..n {
            let j = i + rng.rand_range(0..(len - i) as u64) as usize;
            indices.swap(i, j);
        }

        let drawn = indices[..n]
            .iter()
            .map(|&i| self.observations[i].clone())
            .collect();

        Observations::new(drawn)
    }
}

impl<'a> IntoIterator for &'a Observations {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::stats::rand_util;

    fn scenario() -> Observations {
        let a = [70.0, 72.0, 74.0, 76.0, 78.0].iter().map(|&v| Observation::new("A", v));
        let b = [60.0, 62.0, 64.0, 66.0, 68.0].iter().map(|&v| Observation::new("B", v));

        Observations::new(a.chain(b).collect()).unwrap()
    }

    #[test]
    fn partition_by_group() {
        let observations = scenario();
        let partition = observations.partition();

        assert_eq!(observations.groups(), ["A", "B"]);
        assert_eq!(partition["A"], vec![70.0, 72.0, 74.0, 76.0, 78.0]);
        assert_eq!(partition["B"], vec![60.0, 62.0, 64.0, 66.0, 68.0]);
    }

    #[test]
    fn groups_are_sorted() {
        let observations = Observations::new(vec![
            Observation::new("Yes", 1.0),
            Observation::new("No", 2.0),
        ])
        .unwrap();

        assert_eq!(observations.groups(), ["No", "Yes"]);
        assert_eq!(observations.coded(), vec![(1, 1.0), (0, 2.0)]);
    }

    #[test]
    fn rejects_wrong_number_of_groups() {
        let one = vec![Observation::new("A", 1.0), Observation::new("A", 2.0)];
        let three = vec![
            Observation::new("A", 1.0),
            Observation::new("B", 2.0),
            Observation::new("C", 3.0),
        ];

        for observations in vec![vec![], one, three] {
            match Observations::new(observations) {
                Err(Error::InvalidData(_)) => {}
                other => panic!("expected InvalidData, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_nan() {
        let observations = vec![Observation::new("A", f64::NAN), Observation::new("B", 2.0)];

        assert!(matches!(
            Observations::new(observations),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn draw_size_is_validated() {
        let observations = scenario();
        let mut rng = rand_util::seeded(0);

        for &n in &[0, 11] {
            assert!(matches!(
                observations.draw(n, &mut rng),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let observations = scenario();
        let drawn = observations.draw(10, &mut rand_util::seeded(5)).unwrap();
        let mut values: Vec<f64> = drawn.iter().map(|o| o.value).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());

        assert_eq!(
            values,
            vec![60.0, 62.0, 64.0, 66.0, 68.0, 70.0, 72.0, 74.0, 76.0, 78.0]
        );
    }

    quickcheck! {
        fn draw_is_without_replacement(seed: u64, n: u8) -> TestResult {
            let n = n as usize;
            if n < 2 || n > 200 {
                return TestResult::discard();
            }

            let population = Observations::new(
                (0..200)
                    .map(|i| Observation::new(if i % 2 == 0 { "A" } else { "B" }, f64::from(i)))
                    .collect(),
            )
            .unwrap();

            match population.draw(n, &mut rand_util::seeded(seed)) {
                Ok(sample) => {
                    let distinct = sample.iter().map(|o| o.value as i64).collect::<HashSet<_>>();
                    TestResult::from_bool(sample.len() == n && distinct.len() == n)
                }
                // a small draw may miss a group
                Err(Error::InvalidData(_)) => TestResult::discard(),
                Err(_) => TestResult::failed(),
            }
        }
    }
}
