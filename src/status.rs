//! Position of the current reading relative to the window average

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way comparison of current value against average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AverageStatus {
    Above,
    Below,
    Equal,
}

impl AverageStatus {
    /// Compare with strict inequality; exact ties are `Equal`
    pub fn compare(current: f64, average: f64) -> Self {
        if current > average {
            AverageStatus::Above
        } else if current < average {
            AverageStatus::Below
        } else {
            AverageStatus::Equal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AverageStatus::Above => "Above",
            AverageStatus::Below => "Below",
            AverageStatus::Equal => "Equal",
        }
    }
}

impl fmt::Display for AverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} average", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        assert_eq!(AverageStatus::compare(30.0, 20.0), AverageStatus::Above);
        assert_eq!(AverageStatus::compare(10.0, 20.0), AverageStatus::Below);
        assert_eq!(AverageStatus::compare(20.0, 20.0), AverageStatus::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(AverageStatus::Above.to_string(), "Above average");
        assert_eq!(AverageStatus::Equal.as_str(), "Equal");
    }
}
