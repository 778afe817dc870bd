// vitals-core/src/domain/rules.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dataset::kind::{HEART_RATE_MAX, HEART_RATE_MIN};
use crate::domain::dataset::{DatasetKind, RangeRule};

/// Tunables shared by the quality checker and the cleaning transformer.
/// The defaults are the physiological rules the pipeline was designed around.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_heart_rate_bounds"))]
pub struct ValidationRules {
    #[serde(default = "default_heart_rate_min")]
    #[validate(range(min = 0.0))]
    pub heart_rate_min: f64,

    #[serde(default = "default_heart_rate_max")]
    #[validate(range(min = 0.0))]
    pub heart_rate_max: f64,

    /// Number of retained samples averaged into `hr_rolling_avg`.
    #[serde(default = "default_rolling_window")]
    #[validate(range(min = 1))]
    pub rolling_window: usize,

    /// Below this share of retained heart-rate rows the batch is rejected.
    #[serde(default = "default_min_retention_ratio")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_retention_ratio: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            heart_rate_min: default_heart_rate_min(),
            heart_rate_max: default_heart_rate_max(),
            rolling_window: default_rolling_window(),
            min_retention_ratio: default_min_retention_ratio(),
        }
    }
}

impl ValidationRules {
    pub fn range_rule(&self, kind: DatasetKind) -> RangeRule {
        match kind {
            DatasetKind::HeartRate => RangeRule::Bounded {
                min: self.heart_rate_min,
                max: self.heart_rate_max,
            },
            DatasetKind::Steps => kind.range_rule(),
        }
    }
}

fn validate_heart_rate_bounds(rules: &ValidationRules) -> Result<(), ValidationError> {
    if rules.heart_rate_min > rules.heart_rate_max {
        return Err(ValidationError::new("heart_rate_min_above_max"));
    }
    Ok(())
}

fn default_heart_rate_min() -> f64 {
    HEART_RATE_MIN
}
fn default_heart_rate_max() -> f64 {
    HEART_RATE_MAX
}
fn default_rolling_window() -> usize {
    5
}
fn default_min_retention_ratio() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let rules = ValidationRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.rolling_window, 5);
        assert_eq!(
            rules.range_rule(DatasetKind::HeartRate),
            DatasetKind::HeartRate.range_rule()
        );
    }

    #[test]
    fn test_inverted_bounds_fail_validation() {
        let rules = ValidationRules {
            heart_rate_min: 200.0,
            heart_rate_max: 100.0,
            ..Default::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_zero_window_fails_validation() {
        let rules = ValidationRules {
            rolling_window: 0,
            ..Default::default()
        };
        assert!(rules.validate().is_err());
    }
}
