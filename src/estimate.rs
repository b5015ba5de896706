use std::fmt;

use crate::format;

/// Estimate interval of a population parameter
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// The confidence level used to find the confidence interval
    pub confidence_level: f64,
    /// The lower bound of the confidence interval
    pub lower_bound: f64,
    /// The upper bound of the confidence interval
    pub upper_bound: f64,
}

impl ConfidenceInterval {
    /// Distance between the bounds
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Whether `x` lies within the closed interval
    pub fn contains(&self, x: f64) -> bool {
        self.lower_bound <= x && x <= self.upper_bound
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}] {} CI",
            format::value(self.lower_bound),
            format::value(self.upper_bound),
            format::level(self.confidence_level)
        )
    }
}
