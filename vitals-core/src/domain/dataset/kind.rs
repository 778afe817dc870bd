// vitals-core/src/domain/dataset/kind.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physiological bounds for a heart-rate sample, inclusive.
pub const HEART_RATE_MIN: f64 = 40.0;
pub const HEART_RATE_MAX: f64 = 220.0;

/// The two time series handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    HeartRate,
    Steps,
}

/// Value-level rule attached to a dataset kind's numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeRule {
    /// Values must lie in `[min, max]`.
    Bounded { min: f64, max: f64 },
    /// Values must be `>= 0`.
    NonNegative,
}

impl RangeRule {
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            RangeRule::Bounded { min, max } => (min..=max).contains(&value),
            RangeRule::NonNegative => value >= 0.0,
        }
    }
}

impl DatasetKind {
    pub fn numeric_column(&self) -> &'static str {
        match self {
            DatasetKind::HeartRate => "heart_rate",
            DatasetKind::Steps => "steps",
        }
    }

    /// Destination table once cleaned.
    pub fn table_name(&self) -> &'static str {
        self.numeric_column()
    }

    pub fn range_rule(&self) -> RangeRule {
        match self {
            DatasetKind::HeartRate => RangeRule::Bounded {
                min: HEART_RATE_MIN,
                max: HEART_RATE_MAX,
            },
            DatasetKind::Steps => RangeRule::NonNegative,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.numeric_column())
    }
}
